use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AggregatorError>;

/// Every way a run (or startup) can fail.
///
/// The HTTP layer collapses all variants into one error response; internal
/// callers can still match on them.
#[derive(Debug, Error)]
pub enum AggregatorError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Service account JSON not found at: {}", path.display())]
    CredentialNotFound { path: PathBuf },

    #[error("Failed request: {status} - {body}")]
    SearchRequestFailed { status: u16, body: String },

    #[error("Search request could not be completed: {0}")]
    SearchUnavailable(String),

    #[error("Sheet write failed: {0}")]
    SheetWriteFailed(String),
}

impl AggregatorError {
    pub fn sheet(message: impl Into<String>) -> Self {
        AggregatorError::SheetWriteFailed(message.into())
    }
}
