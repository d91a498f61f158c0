//! Payment gateway port.
//!
//! Implementations open a hosted payment page with an external provider.

use serde::{Deserialize, Serialize};

use crate::domain::NewCheckoutSession;
use crate::error::GatewayError;

/// Session handle returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub id: String,
    /// Redirect URL of the hosted page; providers may omit it
    pub url: Option<String>,
}

/// Port trait for payment providers.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Creates a one-time payment session. No idempotency key is attached,
    /// so repeated calls open distinct sessions.
    async fn create_checkout_session(
        &self,
        session: &NewCheckoutSession,
    ) -> Result<ProviderSession, GatewayError>;
}
