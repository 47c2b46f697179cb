//! Handler for short code creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::url::{CreateUrlRequest, CreateUrlResponse};
use crate::error::AppError;
use crate::state::ConvertState;

/// Creates a short code for a URL.
///
/// # Endpoint
///
/// `POST /api/v1/urls`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "shortCode": "F4kLmR2a",
///   "originalUrl": "https://example.com",
///   "shortUrl": "http://localhost:8000/F4kLmR2a"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is malformed, `originalUrl` is missing, or the URL does not parse
/// - 500 if allocation or persistence fails
pub async fn create_url_handler(
    State(state): State<ConvertState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;

    let Some(original_url) = payload.original_url else {
        return Err(AppError::bad_request("originalUrl is required", json!({})));
    };

    let record = state.shorten_service.create_short_url(&original_url).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse::from_record(record, &state.base_url)),
    ))
}
