use crate::error::Result;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use shortly_core::Table;
use shortly_events::LogEvent;

/// Snapshot of the whole mapping table, keyed by short code.
pub async fn list_urls_handler(State(state): State<AppState>) -> Result<Json<Table>> {
    Ok(Json(state.shortener().list_all().await?))
}

/// The retained event log, oldest first.
pub async fn list_events_handler(State(state): State<AppState>) -> Result<Json<Vec<LogEvent>>> {
    Ok(Json(state.events().list().await?))
}
