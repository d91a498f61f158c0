//! # Stars Hex
//!
//! Application service layer and HTTP adapter for the booking service.
//!
//! ## Architecture
//!
//! - `service/` - Checkout application service (orchestrates the ports)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `C: TripCatalog` and `G: PaymentGateway`,
//! allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{CheckoutService, Timeouts};
