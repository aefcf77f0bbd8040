//! URL shortener service implementation.
//!
//! This crate provides [`ShortenerService`], which validates shortening
//! requests, allocates codes with a bounded retry policy and fronts the
//! persisted mapping table. Core types are re-exported from `shortly_core`.

pub mod service;
pub mod settings;

pub use service::ShortenerService;
pub use settings::{GenerationPolicy, ShortenerSettings};
pub use shortly_core::{ShortenParams, Shortened, Shortener, ShortenerError};
