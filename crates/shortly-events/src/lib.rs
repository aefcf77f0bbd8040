//! Persisted event log for display and debugging.
//!
//! Events live next to the mapping table in the same key-value store, under
//! their own key, and are mirrored to `tracing` as they are appended.

pub mod error;
pub mod event;
pub mod logger;

pub use error::EventLogError;
pub use event::{EventKind, LogEvent};
pub use logger::{EventLogger, EventLoggerSettings, LOG_KEY};
