pub mod catalog;
pub mod error;
pub mod mapping;
pub mod record;

pub use catalog::{FieldCatalog, FieldKind, ImportTarget, TargetField};
pub use error::{CrmError, Result};
pub use mapping::FieldMapping;
pub use record::{Record, StoredRecord};
