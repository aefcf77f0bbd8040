use crate::model::{RowsQuery, ShortenForm};
use crate::state::AppState;
use crate::views::{self, CreatedLink};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Form;
use serde_json::json;
use shortly_core::ShortenerError;
use shortly_events::EventKind;
use std::collections::HashMap;

pub async fn shortener_form_handler(
    State(state): State<AppState>,
    Query(query): Query<RowsQuery>,
) -> Html<String> {
    let form = ShortenForm::blank(query.count());
    Html(views::shortener_page(
        &form,
        &[],
        &[],
        state.default_validity_minutes(),
    ))
}

/// Shortens every submitted row independently. A failing row is reported
/// inline and never prevents the others from being created.
pub async fn shortener_submit_handler(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Html<String> {
    let form = ShortenForm::from_fields(&fields);
    let events = state.events();

    let mut errors = Vec::new();
    let mut created = Vec::new();

    for (index, row) in form.rows.iter().enumerate() {
        let n = index + 1;

        match state.shortener().create(row.to_params()).await {
            Ok(shortened) => {
                events
                    .log(
                        EventKind::ShortCreated,
                        json!({ "row": n, "code": shortened.code, "url": shortened.entry.long_url }),
                    )
                    .await;
                created.push(CreatedLink {
                    row: n,
                    short_url: shortened.code.to_url(state.base_url()),
                    long_url: shortened.entry.long_url,
                    expires_at: shortened.entry.expires_at,
                });
            }
            Err(error) => {
                let (kind, meta) = match &error {
                    ShortenerError::EmptyUrl => (
                        EventKind::ValidationError,
                        json!({ "row": n, "reason": "empty_url" }),
                    ),
                    ShortenerError::InvalidUrl(_) => (
                        EventKind::ValidationError,
                        json!({ "row": n, "url": row.url, "reason": "malformed_url" }),
                    ),
                    other => (
                        EventKind::CreationError,
                        json!({ "row": n, "reason": other.to_string() }),
                    ),
                };
                events.log(kind, meta).await;
                errors.push(format!("Row {n}: {error}"));
            }
        }
    }

    Html(views::shortener_page(
        &form,
        &errors,
        &created,
        state.default_validity_minutes(),
    ))
}
