//! Trip catalog port trait.
//!
//! Adapters (Supabase REST, Postgres, SQLite) implement this trait.

use crate::domain::{Trip, TripId};
use crate::error::CatalogError;

/// Read-only access to the trip catalog.
///
/// Implementations must never return a partially-populated `Trip`:
/// rows go through `Trip::try_from(TripRecord)` before leaving the adapter.
#[async_trait::async_trait]
pub trait TripCatalog: Send + Sync + 'static {
    /// Gets a trip by ID. `Ok(None)` means the store has no such record.
    async fn get_trip(&self, id: &TripId) -> Result<Option<Trip>, CatalogError>;

    /// Lists all valid trips ordered by creation time, oldest first.
    ///
    /// Records failing validation are excluded and logged.
    async fn list_trips(&self) -> Result<Vec<Trip>, CatalogError>;
}
