//! Row shapes of the `Property`, `Bedroom` and `Photo` tables.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct PropertyRow {
    pub id: i64,
    /// Numeric [`PropertyType`](crate::models::PropertyType) code.
    pub property_type: i64,
    pub country: String,
    pub ingest_run_id: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct BedroomRow {
    pub bedroom_id: i64,
    pub property_id: i64,
    pub available: bool,
    pub room_size: String,
    pub bed_size: String,
    pub rent: i32,
    pub deposit: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct PhotoRow {
    pub photo_id: i64,
    pub property_id: i64,
    pub uri: String,
}
