use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use shortly_core::ShortenerError;
use shortly_events::EventLogError;
use shortly_redirector::RedirectorError;
use thiserror::Error;
use tracing::error;

use crate::views;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures that escape a handler. Per-row form errors never end up here;
/// they are rendered inline instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error(transparent)]
    Redirector(#[from] RedirectorError),
    #[error(transparent)]
    Events(#[from] EventLogError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let page = views::error_page("Something went wrong. Please try again.");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
    }
}
