//! # Stars Client SDK
//!
//! A typed Rust client for the trip booking API.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use stars_types::{CheckoutRequest, CheckoutSessionResponse, PublicConfigResponse, Trip};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Booking API client.
pub struct StarsClient {
    base_url: String,
    origin: Option<String>,
    http: Client,
}

impl StarsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            origin: None,
            http: Client::new(),
        }
    }

    /// Sends an `Origin` header, which decides where the payment page
    /// redirects back to.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.url(&["health"])?).send().await?;
        Ok(resp.status().is_success())
    }

    /// Lists bookable trips.
    pub async fn list_trips(&self) -> Result<Vec<Trip>, ClientError> {
        self.get(&["api", "trips"]).await
    }

    /// Gets a trip by ID. The id is percent-encoded as one path segment.
    pub async fn get_trip(&self, id: &str) -> Result<Trip, ClientError> {
        self.get(&["api", "trips", id]).await
    }

    /// Fetches the publishable payment key.
    pub async fn public_config(&self) -> Result<PublicConfigResponse, ClientError> {
        self.get(&["api", "config"]).await
    }

    /// Opens a checkout session and returns the payment page URL.
    pub async fn create_checkout_session(
        &self,
        trip_id: &str,
        departure_date: &str,
    ) -> Result<CheckoutSessionResponse, ClientError> {
        let req = CheckoutRequest::new(trip_id, departure_date);
        self.post(&["api", "create-checkout-session"], &req).await
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let resp = self.http.get(self.url(segments)?).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        let mut req = self.http.post(self.url(segments)?).json(body);
        if let Some(origin) = &self.origin {
            req = req.header("Origin", origin);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
