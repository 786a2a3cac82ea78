use thiserror::Error;

/// Error for content id parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for content operations
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("Invalid id: {0}")]
    InvalidId(#[from] ContentIdError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ContentError {
    fn from(err: anyhow::Error) -> Self {
        ContentError::Unknown(err.to_string())
    }
}
