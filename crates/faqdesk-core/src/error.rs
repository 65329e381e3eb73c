use thiserror::Error;

pub type Result<T> = std::result::Result<T, FaqdeskError>;

#[derive(Debug, Error)]
pub enum FaqdeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Index document is malformed: {0}")]
    IndexShape(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Store read failed for {key}: {reason}")]
    StoreRead { key: String, reason: String },

    #[error("Generation failed: {0}")]
    Generate(String),
}
