use crate::error::Result;
use crate::state::AppState;
use crate::views;
use axum::extract::{Path, State};
use axum::http::header::{ACCEPT_LANGUAGE, REFERER};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use shortly_core::ClickMetadata;
use shortly_redirector::RedirectState;

pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(shortcode): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    let metadata = click_metadata(&headers);
    let outcome = state.redirector().visit(&shortcode, metadata).await?;

    let status = match &outcome {
        RedirectState::Redirecting { long_url } => {
            return Ok(Redirect::temporary(long_url).into_response());
        }
        RedirectState::Expired => StatusCode::GONE,
        RedirectState::NotFound | RedirectState::Checking => StatusCode::NOT_FOUND,
    };

    Ok((status, Html(views::redirect_page(&shortcode, &outcome))).into_response())
}

/// Visitor details from the request: the `Referer` header and the first
/// `Accept-Language` tag.
fn click_metadata(headers: &HeaderMap) -> ClickMetadata {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let language = header(ACCEPT_LANGUAGE)
        .and_then(|value| value.split(',').next())
        .and_then(|tag| tag.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != "*")
        .map(str::to_string);

    ClickMetadata {
        referrer: header(REFERER).map(str::to_string),
        language,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn takes_first_language_tag() {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("fr-CH, fr;q=0.9, en;q=0.8"),
        );
        headers.insert(REFERER, HeaderValue::from_static("https://ref.example/page"));

        let metadata = click_metadata(&headers);

        assert_eq!(metadata.language.as_deref(), Some("fr-CH"));
        assert_eq!(metadata.referrer.as_deref(), Some("https://ref.example/page"));
    }

    #[test]
    fn quality_suffix_is_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US;q=0.7"));
        assert_eq!(click_metadata(&headers).language.as_deref(), Some("en-US"));
    }

    #[test]
    fn missing_headers_are_absent() {
        let metadata = click_metadata(&HeaderMap::new());
        assert_eq!(metadata, ClickMetadata::default());

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("*"));
        assert_eq!(click_metadata(&headers).language, None);
    }
}
