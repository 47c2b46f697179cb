//! Handler for short code redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::RedirectState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// # Request Flow
///
/// 1. Check the resolution cache
/// 2. On miss, query the record store and write the mapping back to the cache
/// 3. Return `302 Found` with the original URL in `Location`
///
/// # Errors
///
/// - 400 if the code is empty
/// - 404 if the code is unknown
/// - 500 if the record store is unavailable
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<RedirectState>,
) -> Result<Response, AppError> {
    let original_url = state.resolve_service.resolve(&short_code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location(&original_url)?)]).into_response())
}

/// Rejects requests whose short code path segment is empty.
pub async fn missing_code_handler() -> AppError {
    AppError::bad_request("Short code is required", json!({}))
}

/// Builds the `Location` header value.
///
/// ASCII URLs are sent verbatim. Anything else is sent in its percent-encoded
/// [`url::Url`] serialization.
///
/// # Errors
///
/// Returns [`AppError::StoreUnavailable`] when the stored URL cannot be
/// expressed as a header value; the store holds a record it should never have
/// accepted.
fn location(original_url: &str) -> Result<HeaderValue, AppError> {
    let invalid = |reason: String| {
        AppError::store_unavailable(format!(
            "stored URL {:?} is not a valid Location: {}",
            original_url, reason
        ))
    };

    if original_url.is_ascii() {
        return HeaderValue::from_str(original_url).map_err(|e| invalid(e.to_string()));
    }

    let parsed = url::Url::parse(original_url).map_err(|e| invalid(e.to_string()))?;
    HeaderValue::from_str(parsed.as_str()).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_keeps_ascii_url() {
        assert_eq!(
            location("https://example.com/a?b=c").unwrap(),
            "https://example.com/a?b=c"
        );
    }

    #[test]
    fn test_location_percent_encodes_non_ascii() {
        let value = location("https://example.com/ünï").unwrap();

        assert_eq!(value, "https://example.com/%C3%BCn%C3%AF");
        assert!(value.as_bytes().is_ascii());
    }

    #[test]
    fn test_location_percent_encodes_non_ascii_host() {
        let value = location("https://bücher.example/").unwrap();

        assert_eq!(value, "https://xn--bcher-kva.example/");
    }

    #[test]
    fn test_location_rejects_control_characters() {
        let err = location("https://example.com/a\nb").unwrap_err();

        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }
}
