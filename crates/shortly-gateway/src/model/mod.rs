mod api;
mod form;

pub use api::HealthResponse;
pub use form::{FormRow, RowsQuery, ShortenForm, MAX_ROWS};
