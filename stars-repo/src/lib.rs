//! # Stars Repository
//!
//! Concrete trip catalog implementations (adapters) for the booking service.
//! Every adapter implements the `TripCatalog` port:
//!
//! - `rest` - Supabase REST (PostgREST) over HTTP, always available
//! - `postgres` - direct PostgreSQL access (feature `postgres`)
//! - `sqlite` - SQLite, for local development and tests (feature `sqlite`)

use std::time::Duration;

use async_trait::async_trait;
use stars_types::{CatalogError, Trip, TripCatalog, TripId, TripRecord};

#[cfg(feature = "postgres")]
pub mod postgres;
pub mod rest;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "postgres", feature = "sqlite"))]
mod types;


#[cfg(feature = "postgres")]
pub use postgres::PostgresCatalog;
pub use rest::{RestCatalog, RestCatalogConfig};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteCatalog;

/// Where trip records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogConfig {
    /// Supabase project URL and anon key.
    Supabase { url: String, anon_key: String },
    /// `postgres://...` or `sqlite://...` connection string.
    Database { url: String },
}

/// Unified catalog wrapper over the compiled-in adapters.
pub enum Catalog {
    Rest(RestCatalog),
    #[cfg(feature = "postgres")]
    Postgres(PostgresCatalog),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteCatalog),
}

/// Build and initialize a catalog from configuration.
///
/// Database-backed catalogs connect and run migrations before returning.
/// `timeout` bounds each HTTP request of the REST adapter.
///
/// # Examples
///
/// ```ignore
/// let catalog = build_catalog(
///     &CatalogConfig::Supabase { url, anon_key },
///     Duration::from_secs(5),
/// )
/// .await?;
/// ```
pub async fn build_catalog(config: &CatalogConfig, timeout: Duration) -> anyhow::Result<Catalog> {
    match config {
        CatalogConfig::Supabase { url, anon_key } => {
            let catalog = RestCatalog::new(RestCatalogConfig {
                base_url: url.clone(),
                anon_key: anon_key.clone(),
                timeout,
            })?;
            Ok(Catalog::Rest(catalog))
        }
        CatalogConfig::Database { url } => connect_database(url).await,
    }
}

async fn connect_database(url: &str) -> anyhow::Result<Catalog> {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        #[cfg(feature = "postgres")]
        return Ok(Catalog::Postgres(PostgresCatalog::new(url).await?));
        #[cfg(not(feature = "postgres"))]
        anyhow::bail!("DATABASE_URL is a Postgres URL but the `postgres` feature is disabled");
    }

    if url.starts_with("sqlite:") {
        #[cfg(feature = "sqlite")]
        return Ok(Catalog::Sqlite(SqliteCatalog::new(url).await?));
        #[cfg(not(feature = "sqlite"))]
        anyhow::bail!("DATABASE_URL is a SQLite URL but the `sqlite` feature is disabled");
    }

    anyhow::bail!("Unsupported DATABASE_URL scheme: {}", url)
}

/// Validates one record, turning a malformed row into `InvalidRecord`.
pub(crate) fn into_trip(record: TripRecord) -> Result<Trip, CatalogError> {
    Trip::try_from(record).map_err(CatalogError::from)
}

/// Validates a batch of records, dropping and reporting the malformed ones.
pub(crate) fn keep_valid(records: impl IntoIterator<Item = TripRecord>) -> Vec<Trip> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            match Trip::try_from(record) {
                Ok(trip) => Some(trip),
                Err(e) => {
                    tracing::warn!(trip_id = ?id, error = %e, "Excluding invalid trip record");
                    None
                }
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement TripCatalog for Catalog (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TripCatalog for Catalog {
    async fn get_trip(&self, id: &TripId) -> Result<Option<Trip>, CatalogError> {
        match self {
            Catalog::Rest(inner) => inner.get_trip(id).await,
            #[cfg(feature = "postgres")]
            Catalog::Postgres(inner) => inner.get_trip(id).await,
            #[cfg(feature = "sqlite")]
            Catalog::Sqlite(inner) => inner.get_trip(id).await,
        }
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, CatalogError> {
        match self {
            Catalog::Rest(inner) => inner.list_trips().await,
            #[cfg(feature = "postgres")]
            Catalog::Postgres(inner) => inner.list_trips().await,
            #[cfg(feature = "sqlite")]
            Catalog::Sqlite(inner) => inner.list_trips().await,
        }
    }
}
