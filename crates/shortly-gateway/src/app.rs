use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    clear_handler, delete_handler, health_handler, list_events_handler, list_urls_handler,
    redirect_handler, shortener_form_handler, shortener_submit_handler, stats_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route(
                "/",
                get(shortener_form_handler).post(shortener_submit_handler),
            )
            .route("/health", get(health_handler))
            .route("/stats", get(stats_handler))
            .route("/stats/clear", post(clear_handler))
            .route("/stats/{code}/delete", post(delete_handler))
            .nest(
                "/api",
                Router::new()
                    .route("/urls", get(list_urls_handler))
                    .route("/events", get(list_events_handler)),
            )
            .route("/{shortcode}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
