use thiserror::Error;

/// Errors that can occur during project store operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid project id: {0}")]
    InvalidIdentifier(String),
    #[error("project not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl ProjectError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
