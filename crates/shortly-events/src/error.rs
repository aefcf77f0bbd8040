use shortly_core::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EventLogError>;

#[derive(Debug, Clone, Error)]
pub enum EventLogError {
    #[error("event log is unreadable: {0}")]
    Corrupt(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
