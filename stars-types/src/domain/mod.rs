//! Domain models for the trip booking service.

pub mod booking;
pub mod checkout;
pub mod trip;

pub use booking::{Booking, BookingId, BookingStatus};
pub use checkout::{CheckoutLineItem, NewCheckoutSession, PaymentMode};
pub use trip::{Trip, TripId, TripRecord};
