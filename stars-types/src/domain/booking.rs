//! Booking domain model.
//!
//! Mirrors the `bookings` table of the record store. Checkout never creates
//! or updates bookings; payment reconciliation belongs to another service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::trip::TripId;

/// Unique identifier for a Booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: String,
    pub trip_id: TripId,
    pub departure_date: String,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_payment_id: Option<String>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
        let parsed: BookingStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, BookingStatus::Cancelled);
        assert!(serde_json::from_str::<BookingStatus>("\"refunded\"").is_err());
    }

    #[test]
    fn test_booking_row_shape() {
        let booking: Booking = serde_json::from_value(serde_json::json!({
            "id": "5b0f6c1e-8c1a-4d6e-9a57-2f0c1b7e9d10",
            "user_id": "user-1",
            "trip_id": "t1",
            "departure_date": "2025-06-01",
            "status": "pending",
            "created_at": "2024-11-02T09:15:00Z",
            "updated_at": "2024-11-02T09:15:00Z"
        }))
        .unwrap();

        assert_eq!(booking.id.to_string(), "5b0f6c1e-8c1a-4d6e-9a57-2f0c1b7e9d10");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.stripe_payment_id, None);
    }
}
