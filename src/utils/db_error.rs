//! Mapping of SQLx errors onto the record store error taxonomy.

use crate::error::AppError;

/// Name of the unique constraint on `urls.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "urls_short_code_key";

pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT) | None)
}

/// Converts a SQLx error for an operation on `short_code`.
///
/// Unique violations on the short code become [`AppError::DuplicateShortCode`];
/// everything else (connection loss, pool exhaustion, timeouts) is
/// [`AppError::StoreUnavailable`].
pub fn map_sqlx_error(e: sqlx::Error, short_code: &str) -> AppError {
    if is_unique_violation_on_code(&e) {
        return AppError::DuplicateShortCode {
            code: short_code.to_string(),
        };
    }

    AppError::store_unavailable(e.to_string())
}
