//! # Stars Stripe
//!
//! Payment gateway adapter backed by Stripe Checkout Sessions.
//!
//! Sessions are created with a single form-encoded `POST /v1/checkout/sessions`
//! call. Nested parameters use Stripe's bracket notation, e.g.
//! `line_items[0][price_data][unit_amount]=250000`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use stars_types::{GatewayError, NewCheckoutSession, PaymentGateway, ProviderSession};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// API version the request shape is written against.
pub const STRIPE_API_VERSION: &str = "2023-10-16";

/// Connection settings for the Stripe API.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret key (`sk_...`), server side only
    pub secret_key: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Stripe Checkout gateway.
#[derive(Clone)]
pub struct StripeGateway {
    http: Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    pub fn new(config: StripeConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            secret_key: config.secret_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn sessions_url(&self) -> String {
        format!("{}/v1/checkout/sessions", self.api_base)
    }
}

#[derive(Debug, Deserialize)]
struct StripeSession {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Flattens a session request into Stripe's form parameters.
pub fn form_params(session: &NewCheckoutSession) -> Vec<(String, String)> {
    let mut params = Vec::new();

    for (i, method) in session.payment_method_types.iter().enumerate() {
        params.push((format!("payment_method_types[{}]", i), method.clone()));
    }

    for (i, item) in session.line_items.iter().enumerate() {
        let prefix = format!("line_items[{}]", i);
        params.push((
            format!("{}[price_data][currency]", prefix),
            item.currency.clone(),
        ));
        params.push((
            format!("{}[price_data][product_data][name]", prefix),
            item.name.clone(),
        ));
        params.push((
            format!("{}[price_data][product_data][description]", prefix),
            item.description.clone(),
        ));
        params.push((
            format!("{}[price_data][unit_amount]", prefix),
            item.unit_amount.to_string(),
        ));
        params.push((format!("{}[quantity]", prefix), item.quantity.to_string()));
    }

    params.push(("mode".into(), session.mode.as_ref().to_string()));
    params.push(("success_url".into(), session.success_url.clone()));
    params.push(("cancel_url".into(), session.cancel_url.clone()));

    for (key, value) in &session.metadata {
        params.push((format!("metadata[{}]", key), value.clone()));
    }

    params
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<StripeErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message.or(b.error.kind))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[tracing::instrument(skip(self, session), fields(items = session.line_items.len()))]
    async fn create_checkout_session(
        &self,
        session: &NewCheckoutSession,
    ) -> Result<ProviderSession, GatewayError> {
        let response = self
            .http
            .post(self.sessions_url())
            .bearer_auth(&self.secret_key)
            .header("Stripe-Version", STRIPE_API_VERSION)
            .form(&form_params(session))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "Stripe rejected checkout session");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let created: StripeSession = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        tracing::debug!(session_id = %created.id, "Stripe checkout session created");

        Ok(ProviderSession {
            id: created.id,
            url: created.url,
        })
    }
}
