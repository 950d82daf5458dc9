use crate::model::MemoId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemozError {
    #[error("Memo not found: {0}")]
    MemoNotFound(MemoId),

    #[error("Shared memo not found or expired: {0}")]
    ShareNotFound(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid memo: {0}")]
    Validation(String),

    #[error("Platform unavailable: {0}")]
    PlatformUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl MemozError {
    /// True for the "already gone" family of errors, which callers usually
    /// recover from by re-querying.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MemozError::MemoNotFound(_)
                | MemozError::ShareNotFound(_)
                | MemozError::TemplateNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MemozError>;
