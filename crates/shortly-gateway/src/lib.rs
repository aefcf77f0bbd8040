//! HTTP front end for Shortly.
//!
//! Serves the shortener form, the statistics table and the catch-all
//! redirect route as server-rendered HTML, plus a small JSON surface for
//! health checks and debugging.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod views;

pub use app::App;
pub use error::AppError;
pub use state::{AppState, SharedClock, SharedStore};

/// Path segments claimed by the UI; they can never be used as short codes.
pub const RESERVED_ROUTES: &[&str] = &["stats", "health", "api"];
