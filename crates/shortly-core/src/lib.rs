//! Core types and traits for the Shortly URL shortener.
//!
//! This crate provides the shortcode and entry types, the error enums shared
//! by every layer, the injected key-value store contract and the clock
//! abstraction used for expiry decisions.

pub mod clock;
pub mod entry;
pub mod error;
pub mod shortcode;
pub mod shortener;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{ClickMetadata, ClickRecord, ShortcodeEntry, Table};
pub use error::{CoreError, ShortenerError, StorageError};
pub use shortcode::ShortCode;
pub use shortener::{Shortened, ShortenParams, Shortener};
pub use store::KeyValueStore;
