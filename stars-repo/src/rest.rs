//! Supabase REST (PostgREST) catalog adapter.
//!
//! Reads the `trips` table through the project's REST endpoint using the
//! anon key, the same access path the public site uses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;

use stars_types::{CatalogError, Trip, TripCatalog, TripId, TripRecord};

use crate::{into_trip, keep_valid};

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct RestCatalogConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub base_url: String,
    pub anon_key: String,
    pub timeout: Duration,
}

/// Trip catalog backed by Supabase's REST API.
pub struct RestCatalog {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl RestCatalog {
    pub fn new(config: RestCatalogConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key,
        })
    }

    fn trips_url(&self) -> String {
        format!("{}/rest/v1/trips", self.base_url)
    }

    async fn fetch_rows(&self, query: &[(&str, String)]) -> Result<Vec<Value>, CatalogError> {
        let response = self
            .http
            .get(self.trips_url())
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        read_rows(response).await
    }
}

async fn read_rows(response: Response) -> Result<Vec<Value>, CatalogError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(CatalogError::UnexpectedResponse {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<Vec<Value>>()
        .await
        .map_err(|e| CatalogError::Transport(e.to_string()))
}

/// PostgreSQL `invalid_text_representation`, returned when a filter value
/// does not parse as the column type (a non-UUID id against a `uuid` key).
const INVALID_TEXT_REPRESENTATION: &str = "22P02";

fn is_invalid_key_error(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .is_some_and(|v| v.get("code").and_then(Value::as_str) == Some(INVALID_TEXT_REPRESENTATION))
}

/// A row with the wrong JSON types becomes an empty record, which then fails
/// validation like any other malformed row.
fn to_record(row: Value) -> TripRecord {
    let id = row.get("id").and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    serde_json::from_value::<TripRecord>(row).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Trip row does not match the expected shape");
        TripRecord {
            id,
            ..TripRecord::default()
        }
    })
}

#[async_trait]
impl TripCatalog for RestCatalog {
    #[tracing::instrument(skip(self), fields(trip_id = %id))]
    async fn get_trip(&self, id: &TripId) -> Result<Option<Trip>, CatalogError> {
        let result = self
            .fetch_rows(&[
                ("select", "*".to_string()),
                ("id", format!("eq.{}", id)),
                ("limit", "1".to_string()),
            ])
            .await;

        let rows = match result {
            Ok(rows) => rows,
            // An id that cannot be a key names no trip.
            Err(CatalogError::UnexpectedResponse { status: 400, message })
                if is_invalid_key_error(&message) =>
            {
                tracing::debug!(%message, "Trip id is not a valid key");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        rows.into_iter()
            .next()
            .map(|row| into_trip(to_record(row)))
            .transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn list_trips(&self) -> Result<Vec<Trip>, CatalogError> {
        let rows = self
            .fetch_rows(&[
                ("select", "*".to_string()),
                ("order", "created_at.asc".to_string()),
            ])
            .await?;

        Ok(keep_valid(rows.into_iter().map(to_record)))
    }
}
