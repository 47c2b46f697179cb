//! Handler for record metadata lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::url::UrlRecordResponse;
use crate::error::AppError;
use crate::state::RedirectState;

/// Returns the full record for a short code.
///
/// # Endpoint
///
/// `GET /api/v1/urls/{short_code}`
///
/// # Errors
///
/// Same as [`crate::api::handlers::redirect_handler`].
pub async fn get_url_handler(
    Path(short_code): Path<String>,
    State(state): State<RedirectState>,
) -> Result<Json<UrlRecordResponse>, AppError> {
    let record = state.resolve_service.get_record(&short_code).await?;

    Ok(Json(record.into()))
}
