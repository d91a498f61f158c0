//! Trip domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Opaque identifier of a Trip in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TripId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TripId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TripId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A bookable itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Trip {
    pub id: TripId,
    #[schema(example = "Lunar Getaway")]
    pub title: String,
    pub description: String,
    /// Display text describing trip length
    #[schema(example = "7 days")]
    pub duration: String,
    /// Price in smallest currency unit (cents)
    #[schema(example = 250000)]
    pub price: i64,
    pub image_url: String,
    /// Informational capacity; never decremented by checkout
    pub available_seats: i32,
    /// Dates this trip may be booked for, in catalog order
    #[schema(example = json!(["2025-06-01", "2025-07-01"]))]
    pub departure_dates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Returns true if `date` is one of this trip's departure dates.
    pub fn offers_departure(&self, date: &str) -> bool {
        self.departure_dates.iter().any(|d| d == date)
    }
}

/// A trip row as read from a store, before validation.
///
/// Adapters map their rows into this shape and convert with `Trip::try_from`,
/// so a partially-populated record never escapes the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    pub available_seats: Option<i32>,
    pub departure_dates: Option<Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
}

fn required(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::InvalidTrip(format!("missing {}", field))),
    }
}

impl TryFrom<TripRecord> for Trip {
    type Error = DomainError;

    fn try_from(record: TripRecord) -> Result<Self, Self::Error> {
        let id = required("id", record.id)?;
        let title = required("title", record.title)?;
        let description = required("description", record.description)?;
        let image_url = required("image_url", record.image_url)?;

        let price = match record.price {
            Some(p) if p > 0 => p,
            Some(p) => {
                return Err(DomainError::InvalidTrip(format!(
                    "price must be positive, got {}",
                    p
                )));
            }
            None => return Err(DomainError::InvalidTrip("missing price".into())),
        };

        let departure_dates = record.departure_dates.unwrap_or_default();
        if departure_dates.is_empty() {
            return Err(DomainError::InvalidTrip("no departure dates".into()));
        }

        Ok(Self {
            id: TripId(id),
            title,
            description,
            duration: record.duration.unwrap_or_default(),
            price,
            image_url,
            available_seats: record.available_seats.unwrap_or(0),
            departure_dates,
            created_at: record.created_at,
        })
    }
}
