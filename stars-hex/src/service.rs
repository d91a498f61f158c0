//! Checkout Application Service
//!
//! Orchestrates the trip catalog and payment gateway ports.
//! Contains NO infrastructure logic - pure business orchestration.

use std::time::Duration;

use stars_types::{
    AppError, CheckoutRequest, CheckoutSessionResponse, NewCheckoutSession, PaymentGateway, Trip,
    TripCatalog, TripId,
};

pub const MISSING_FIELDS: &str = "Missing required fields: tripId and departureDate";
pub const TRIP_NOT_FOUND: &str = "Trip not found";
pub const TRIP_LOOKUP_FAILED: &str = "Failed to fetch trip details";
pub const TRIP_LIST_FAILED: &str = "Failed to load trips";
pub const INVALID_DEPARTURE_DATE: &str = "Invalid departure date";
pub const SESSION_WITHOUT_URL: &str = "Failed to create Stripe session";
pub const PROVIDER_TIMEOUT: &str = "Payment provider request timed out";

/// Upper bounds on the two outbound calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub catalog: Duration,
    pub provider: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            catalog: Duration::from_secs(5),
            provider: Duration::from_secs(10),
        }
    }
}

/// Application service for trip checkout.
///
/// Generic over both ports - adapters are injected at compile time.
/// Each call is independent: one catalog read, then at most one provider call.
pub struct CheckoutService<C: TripCatalog, G: PaymentGateway> {
    catalog: C,
    gateway: G,
    timeouts: Timeouts,
}

impl<C: TripCatalog, G: PaymentGateway> CheckoutService<C, G> {
    /// Creates a new checkout service with default timeouts.
    pub fn new(catalog: C, gateway: G) -> Self {
        Self::with_timeouts(catalog, gateway, Timeouts::default())
    }

    pub fn with_timeouts(catalog: C, gateway: G, timeouts: Timeouts) -> Self {
        Self {
            catalog,
            gateway,
            timeouts,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Checkout
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a hosted checkout session for one trip departure.
    ///
    /// `origin` is the caller's `Origin` header and only shapes the
    /// success/cancel redirect targets.
    #[tracing::instrument(skip(self), fields(trip_id, departure_date))]
    pub async fn create_checkout_session(
        &self,
        req: CheckoutRequest,
        origin: Option<&str>,
    ) -> Result<CheckoutSessionResponse, AppError> {
        let (trip_id, departure_date) = match (req.trip_id, req.departure_date) {
            (Some(t), Some(d)) if !t.is_empty() && !d.is_empty() => (TripId::new(t), d),
            _ => return Err(AppError::BadRequest(MISSING_FIELDS.into())),
        };

        let span = tracing::Span::current();
        span.record("trip_id", tracing::field::display(&trip_id));
        span.record("departure_date", departure_date.as_str());

        let trip = self.fetch_trip(&trip_id).await?;

        if !trip.offers_departure(&departure_date) {
            tracing::info!("Rejected departure date not offered by trip");
            return Err(AppError::BadRequest(INVALID_DEPARTURE_DATE.into()));
        }

        let session = NewCheckoutSession::for_trip(&trip, &departure_date, origin.unwrap_or(""));

        let created = tokio::time::timeout(
            self.timeouts.provider,
            self.gateway.create_checkout_session(&session),
        )
        .await
        .map_err(|_| {
            tracing::error!(timeout = ?self.timeouts.provider, "Payment provider timed out");
            AppError::ProviderError(PROVIDER_TIMEOUT.into())
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "Error creating checkout session");
            AppError::from(e)
        })?;

        match created.url {
            Some(url) if !url.is_empty() => {
                tracing::info!(session_id = %created.id, "Checkout session created");
                Ok(CheckoutSessionResponse { url })
            }
            _ => {
                tracing::error!(session_id = %created.id, "Provider returned a session without a URL");
                Err(AppError::ProviderError(SESSION_WITHOUT_URL.into()))
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Catalog reads
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets a trip by ID.
    pub async fn get_trip(&self, id: &TripId) -> Result<Trip, AppError> {
        self.fetch_trip(id).await
    }

    /// Lists all trips, oldest first.
    pub async fn list_trips(&self) -> Result<Vec<Trip>, AppError> {
        tokio::time::timeout(self.timeouts.catalog, self.catalog.list_trips())
            .await
            .map_err(|_| {
                tracing::error!(timeout = ?self.timeouts.catalog, "Trip catalog timed out");
                AppError::LookupFailed(TRIP_LIST_FAILED.into())
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "Catalog error while listing trips");
                AppError::LookupFailed(TRIP_LIST_FAILED.into())
            })
    }

    async fn fetch_trip(&self, id: &TripId) -> Result<Trip, AppError> {
        tokio::time::timeout(self.timeouts.catalog, self.catalog.get_trip(id))
            .await
            .map_err(|_| {
                tracing::error!(timeout = ?self.timeouts.catalog, "Trip catalog timed out");
                AppError::LookupFailed(TRIP_LOOKUP_FAILED.into())
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "Catalog error");
                AppError::LookupFailed(TRIP_LOOKUP_FAILED.into())
            })?
            .ok_or_else(|| AppError::NotFound(TRIP_NOT_FOUND.into()))
    }
}
