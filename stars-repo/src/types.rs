//! Database row types for the SQL catalog adapters.

use sqlx::FromRow;

use stars_types::TripRecord;

#[cfg(feature = "postgres")]
use chrono::{DateTime, Utc};

/// Trip row from PostgreSQL. Columns are nullable here so that a bad row
/// surfaces as a validation failure instead of a decode error.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgTripRow {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    pub available_seats: Option<i32>,
    pub departure_dates: Option<Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(feature = "postgres")]
impl From<PgTripRow> for TripRecord {
    fn from(row: PgTripRow) -> Self {
        TripRecord {
            id: Some(row.id),
            title: row.title,
            description: row.description,
            duration: row.duration,
            price: row.price,
            image_url: row.image_url,
            available_seats: row.available_seats,
            departure_dates: row.departure_dates,
            created_at: row.created_at,
        }
    }
}

/// Trip row from SQLite. `departure_dates` is a JSON array in a TEXT column
/// and `created_at` is RFC 3339 text.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteTripRow {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    pub available_seats: Option<i32>,
    pub departure_dates: Option<String>,
    pub created_at: Option<String>,
}

#[cfg(feature = "sqlite")]
impl From<SqliteTripRow> for TripRecord {
    fn from(row: SqliteTripRow) -> Self {
        let departure_dates = row
            .departure_dates
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok());
        let created_at = row
            .created_at
            .and_then(|raw| chrono::DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc));

        TripRecord {
            id: Some(row.id),
            title: row.title,
            description: row.description,
            duration: row.duration,
            price: row.price,
            image_url: row.image_url,
            available_seats: row.available_seats,
            departure_dates,
            created_at,
        }
    }
}
