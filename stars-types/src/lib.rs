//! # Stars Types
//!
//! Domain types and port traits for the trip booking service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Trip, Booking, checkout session request)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Booking, BookingId, BookingStatus, CheckoutLineItem, NewCheckoutSession, PaymentMode, Trip,
    TripId, TripRecord,
};
pub use dto::*;
pub use error::{AppError, CatalogError, DomainError, GatewayError};
pub use ports::{PaymentGateway, ProviderSession, TripCatalog};
