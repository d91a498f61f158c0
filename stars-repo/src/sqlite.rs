//! SQLite catalog adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use stars_types::{CatalogError, Trip, TripCatalog, TripId};

use crate::types::SqliteTripRow;
use crate::{into_trip, keep_valid};

const TRIP_COLUMNS: &str = "id, title, description, duration, price, image_url, available_seats, departure_dates, created_at";

/// SQLite catalog implementation.
pub struct SqliteCatalog {
    pool: SqlitePool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &SqlitePool, sql: &str, name: &str) -> anyhow::Result<()> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl SqliteCatalog {
    /// Creates a new SQLite catalog with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // A single connection keeps `sqlite::memory:` databases shared.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        execute_migration(&pool, include_str!("../migrations/0001_create_trips.sql"), "0001").await?;
        execute_migration(&pool, include_str!("../migrations/0002_create_bookings.sql"), "0002")
            .await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Inserts or replaces a trip. Used to seed local databases.
    pub async fn insert_trip(&self, trip: &Trip) -> Result<(), CatalogError> {
        let departure_dates = serde_json::to_string(&trip.departure_dates)
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        let created_at = trip.created_at.unwrap_or_else(chrono::Utc::now).to_rfc3339();

        sqlx::query(
            r#"INSERT OR REPLACE INTO trips (id, title, description, duration, price, image_url, available_seats, departure_dates, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(trip.id.as_str())
        .bind(&trip.title)
        .bind(&trip.description)
        .bind(&trip.duration)
        .bind(trip.price)
        .bind(&trip.image_url)
        .bind(trip.available_seats)
        .bind(&departure_dates)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TripCatalog for SqliteCatalog {
    async fn get_trip(&self, id: &TripId) -> Result<Option<Trip>, CatalogError> {
        let row: Option<SqliteTripRow> =
            sqlx::query_as(&format!("SELECT {} FROM trips WHERE id = ?", TRIP_COLUMNS))
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| CatalogError::Database(e.to_string()))?;

        row.map(|r| into_trip(r.into())).transpose()
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, CatalogError> {
        let rows: Vec<SqliteTripRow> = sqlx::query_as(&format!(
            "SELECT {} FROM trips ORDER BY created_at ASC",
            TRIP_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(keep_valid(rows.into_iter().map(Into::into)))
    }
}
