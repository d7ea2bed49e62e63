pub mod dedupe;
pub mod pipeline;
pub mod store;

pub use dedupe::{DUPLICATE_KEY_FIELD, DuplicateStrategy, find_duplicate};
pub use pipeline::{
    DEFAULT_BATCH_SIZE, ImportOptions, ImportSummary, build_record, run_import,
};
pub use store::{MemoryStore, RecordStore};
