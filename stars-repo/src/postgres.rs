//! PostgreSQL catalog adapter.
//!
//! Talks to the same `trips` table Supabase exposes, for deployments that
//! connect to the database directly instead of going through REST.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stars_types::{CatalogError, Trip, TripCatalog, TripId};

use crate::types::PgTripRow;
use crate::{into_trip, keep_valid};

// Casts keep the row shape stable whether dates are stored as `date[]` or
// `text[]`.
const TRIP_COLUMNS: &str = "id::text AS id, title, description, duration, price::bigint AS price, \
     image_url, available_seats, departure_dates::text[] AS departure_dates, created_at";

/// PostgreSQL catalog.
pub struct PostgresCatalog {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
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

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_trips_pg.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/0002_create_bookings_pg.sql"),
        "0002",
    )
    .await?;

    Ok(())
}

impl PostgresCatalog {
    /// Creates a new PostgreSQL catalog with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn trip_key(id: &TripId) -> Option<Uuid> {
    Uuid::parse_str(id.as_str()).ok()
}

#[async_trait]
impl TripCatalog for PostgresCatalog {
    async fn get_trip(&self, id: &TripId) -> Result<Option<Trip>, CatalogError> {
        // Ids are uuids; anything else cannot match a row.
        let Some(key) = trip_key(id) else {
            return Ok(None);
        };

        let row: Option<PgTripRow> =
            sqlx::query_as(&format!("SELECT {} FROM trips WHERE id = $1", TRIP_COLUMNS))
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| CatalogError::Database(e.to_string()))?;

        row.map(|r| into_trip(r.into())).transpose()
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, CatalogError> {
        let rows: Vec<PgTripRow> = sqlx::query_as(&format!(
            "SELECT {} FROM trips ORDER BY created_at ASC",
            TRIP_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(keep_valid(rows.into_iter().map(Into::into)))
    }
}
