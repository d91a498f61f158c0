//! Hosted checkout session request, as handed to a payment gateway.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::trip::Trip;

/// Placeholder the provider substitutes with its own session id on redirect.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Trips are always charged in US dollars.
pub const CHECKOUT_CURRENCY: &str = "usd";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// One-time payment.
    Payment,
}

impl AsRef<str> for PaymentMode {
    fn as_ref(&self) -> &str {
        match self {
            Self::Payment => "payment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    pub name: String,
    pub description: String,
    /// Smallest currency unit, copied from the trip price unchanged
    pub unit_amount: i64,
    pub currency: String,
    pub quantity: u32,
}

/// Everything a gateway needs to open a hosted payment page for one trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCheckoutSession {
    pub line_items: Vec<CheckoutLineItem>,
    pub mode: PaymentMode,
    pub payment_method_types: Vec<String>,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: BTreeMap<String, String>,
}

impl NewCheckoutSession {
    /// Builds the session for `trip` departing on `departure_date`.
    ///
    /// `origin` is the caller's origin header; an empty origin yields
    /// relative redirect targets.
    pub fn for_trip(trip: &Trip, departure_date: &str, origin: &str) -> Self {
        let line_item = CheckoutLineItem {
            name: trip.title.clone(),
            description: format!("{} - Departure: {}", trip.description, departure_date),
            unit_amount: trip.price,
            currency: CHECKOUT_CURRENCY.to_string(),
            quantity: 1,
        };

        let mut metadata = BTreeMap::new();
        metadata.insert("tripId".to_string(), trip.id.to_string());
        metadata.insert("departureDate".to_string(), departure_date.to_string());

        Self {
            line_items: vec![line_item],
            mode: PaymentMode::Payment,
            payment_method_types: vec!["card".to_string()],
            success_url: format!("{}/success?session_id={}", origin, SESSION_ID_PLACEHOLDER),
            cancel_url: format!("{}/", origin),
            metadata,
        }
    }
}
