use thiserror::Error;

/// Result type for key-value store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage serialization failed: {0}")]
    Serialization(String),
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced to the user when creating or managing short links.
///
/// The display strings are shown inline next to the offending form row.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("URL is required.")]
    EmptyUrl,
    #[error("URL appears malformed. Make sure it starts with http:// or https:// ({0})")]
    InvalidUrl(String),
    #[error("Preferred shortcode must be 3-40 letters, digits, hyphens or underscores ({0}).")]
    InvalidShortCode(String),
    #[error("Preferred shortcode is already in use: {0}")]
    AliasConflict(String),
    #[error("Unable to generate a unique shortcode after {attempts} attempts, try again.")]
    Exhausted { attempts: usize },
    #[error("Validity window is out of range: {0}")]
    InvalidValidity(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
        }
    }
}
