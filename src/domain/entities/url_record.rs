//! URL record entity: the persisted mapping between a short code and a URL.

use chrono::{DateTime, Utc};

/// A persisted short code mapping.
///
/// `id` is assigned by the record store on insert and is unrelated to the
/// allocator's counter value the code was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
            updated_at,
        }
    }
}
