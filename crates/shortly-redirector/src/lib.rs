//! Redirector for visited short codes.
//!
//! A visit moves through [`RedirectState`]: it starts in `Checking`, then the
//! code is looked up and the visit ends in `NotFound`, `Expired`, or
//! `Redirecting` after a click has been recorded.

pub mod error;
pub mod redirector;
pub mod service;
pub mod state;

pub use error::{RedirectorError, Result};
pub use redirector::Redirector;
pub use service::RedirectorService;
pub use state::RedirectState;
