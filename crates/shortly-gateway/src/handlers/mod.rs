mod api;
mod health;
mod redirect;
mod shortener;
mod stats;

pub use api::{list_events_handler, list_urls_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shortener::{shortener_form_handler, shortener_submit_handler};
pub use stats::{clear_handler, delete_handler, stats_handler};
