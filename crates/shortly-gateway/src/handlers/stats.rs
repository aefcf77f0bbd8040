use crate::error::Result;
use crate::state::AppState;
use crate::views::{self, StatsRow};
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use serde_json::json;
use shortly_core::ShortCode;
use shortly_events::EventKind;
use tracing::debug;

pub async fn stats_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let now = state.clock().now();
    let mut rows: Vec<StatsRow> = state
        .shortener()
        .list_all()
        .await?
        .into_iter()
        .map(|(code, entry)| StatsRow {
            short_url: code.to_url(state.base_url()),
            expired: entry.is_expired_at(now),
            code,
            entry,
        })
        .collect();
    rows.sort_by(|a, b| {
        a.entry
            .created_at
            .cmp(&b.entry.created_at)
            .then_with(|| a.code.cmp(&b.code))
    });

    Ok(Html(views::stats_page(&rows)))
}

pub async fn delete_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect> {
    // A segment outside the shortcode pattern cannot be in the table.
    if let Ok(code) = ShortCode::new(code) {
        let removed = state.shortener().remove(&code).await?;
        if removed {
            state
                .events()
                .log(EventKind::ShortDeleted, json!({ "code": code }))
                .await;
        } else {
            debug!(code = %code, "delete requested for unknown short code");
        }
    }

    Ok(Redirect::to("/stats"))
}

pub async fn clear_handler(State(state): State<AppState>) -> Result<Redirect> {
    state.shortener().clear_all().await?;
    state
        .events()
        .log(EventKind::StoreCleared, json!({}))
        .await;

    Ok(Redirect::to("/stats"))
}
