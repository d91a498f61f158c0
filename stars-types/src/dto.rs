//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─────────────────────────────────────────────────────────────────────────────
// Checkout DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to open a hosted checkout for one trip departure.
///
/// Both fields are optional on the wire so that a missing field is reported
/// as a validation error rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Trip identifier
    #[schema(example = "t1")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
    /// One of the trip's departure dates
    #[schema(example = "2025-06-01")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
}

impl CheckoutRequest {
    pub fn new(trip_id: impl Into<String>, departure_date: impl Into<String>) -> Self {
        Self {
            trip_id: Some(trip_id.into()),
            departure_date: Some(departure_date.into()),
        }
    }
}

/// Response after a checkout session was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckoutSessionResponse {
    /// Redirect URL of the hosted payment page
    #[schema(example = "https://checkout.stripe.com/c/pay/cs_test_a1b2c3")]
    pub url: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid departure date")]
    pub error: String,
}

/// Public settings the browser needs to initialise the payment widget.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfigResponse {
    #[schema(example = "pk_test_51H...")]
    pub stripe_public_key: String,
}
