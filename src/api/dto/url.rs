//! DTOs for URL creation and lookup endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Request to create a short code.
///
/// `originalUrl` is optional at the serde level so a missing field is reported
/// through validation as a 400 instead of a deserialization rejection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    #[validate(
        required(message = "originalUrl is required"),
        length(min = 1, message = "originalUrl must not be empty")
    )]
    pub original_url: Option<String>,
}

/// Response returned after a short code is created.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
}

impl CreateUrlResponse {
    /// Builds the response, joining `base_url` and the code with a single slash.
    pub fn from_record(record: UrlRecord, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url.trim_end_matches('/'), record.short_code);
        Self {
            id: record.id,
            short_code: record.short_code,
            original_url: record.original_url,
            short_url,
        }
    }
}

/// Full record as returned by the metadata endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecordResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UrlRecord> for UrlRecordResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            id: record.id,
            original_url: record.original_url,
            short_code: record.short_code,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
