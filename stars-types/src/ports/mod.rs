//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod catalog;
mod payment;

pub use catalog::TripCatalog;
pub use payment::{PaymentGateway, ProviderSession};
