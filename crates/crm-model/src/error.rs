use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown import target: {0}")]
    UnknownTarget(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, CrmError>;
