//! Application error type and its HTTP mapping.
//!
//! Client faults (`Validation`, `NotFound`) map to 4xx. Infrastructure and
//! integrity faults map to 500 and are logged when converted into a response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed client input.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The short code has no record.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The shared counter could not be reached or the increment was not confirmed.
    #[error("allocator unavailable: {0}")]
    AllocatorUnavailable(String),

    /// The record store could not be reached or the query timed out.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),

    /// The resolution cache could not be reached.
    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    /// The unique constraint on `short_code` rejected an insert.
    #[error("short code already exists: {code}")]
    DuplicateShortCode { code: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn allocator_unavailable(reason: impl Into<String>) -> Self {
        Self::AllocatorUnavailable(reason.into())
    }

    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable(reason.into())
    }

    pub fn cache_unavailable(reason: impl Into<String>) -> Self {
        Self::CacheUnavailable(reason.into())
    }

    /// Returns true when the caller, not the infrastructure, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotFound { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AllocatorUnavailable(_)
            | Self::StoreUnavailable(_)
            | Self::CacheUnavailable(_)
            | Self::DuplicateShortCode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing payload. Infrastructure reasons stay in the logs.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            Self::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            Self::AllocatorUnavailable(_) => ErrorInfo {
                code: "allocation_failed",
                message: "Failed to generate short URL".to_string(),
                details: json!({}),
            },
            Self::StoreUnavailable(_) => ErrorInfo {
                code: "store_unavailable",
                message: "Record store unavailable".to_string(),
                details: json!({}),
            },
            Self::CacheUnavailable(_) => ErrorInfo {
                code: "cache_unavailable",
                message: "Cache unavailable".to_string(),
                details: json!({}),
            },
            Self::DuplicateShortCode { code } => ErrorInfo {
                code: "duplicate_short_code",
                message: "Short code already exists".to_string(),
                details: json!({ "short_code": code }),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if !self.is_client_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request", json!(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_4xx() {
        let err = AppError::bad_request("bad", json!({}));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.is_client_error());

        let err = AppError::not_found("missing", json!({}));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_infrastructure_errors_map_to_500() {
        for err in [
            AppError::allocator_unavailable("redis down"),
            AppError::store_unavailable("pool timed out"),
            AppError::cache_unavailable("redis down"),
            AppError::DuplicateShortCode {
                code: "0000abc".to_string(),
            },
        ] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(!err.is_client_error());
        }
    }

    #[test]
    fn test_error_info_hides_infrastructure_reason() {
        let info = AppError::store_unavailable("password authentication failed").to_error_info();
        assert_eq!(info.code, "store_unavailable");
        assert!(!info.message.contains("password"));
    }

    #[test]
    fn test_duplicate_code_reports_code() {
        let info = AppError::DuplicateShortCode {
            code: "A1b2C3d".to_string(),
        }
        .to_error_info();
        assert_eq!(info.details["short_code"], "A1b2C3d");
    }
}
