//! Shared fixtures for HTTP-level tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, Response},
};
use http_body_util::BodyExt;

use stars_hex::{
    CheckoutService,
    inbound::{HttpServer, RateLimiterState},
};
use stars_types::{
    CatalogError, GatewayError, NewCheckoutSession, PaymentGateway, ProviderSession, Trip,
    TripCatalog, TripId,
};

pub const PUBLIC_KEY: &str = "pk_test_stars";

pub fn lunar_getaway() -> Trip {
    Trip {
        id: TripId::new("t1"),
        title: "Lunar Getaway".into(),
        description: "A week in lunar orbit".into(),
        duration: "7 days".into(),
        price: 250000,
        image_url: "https://images.example.com/moon.jpg".into(),
        available_seats: 12,
        departure_dates: vec!["2025-06-01".into(), "2025-07-01".into()],
        created_at: None,
    }
}

/// Catalog holding a fixed set of trips.
pub struct StubCatalog {
    trips: Vec<Trip>,
}

impl StubCatalog {
    pub fn with_lunar_getaway() -> Self {
        Self {
            trips: vec![lunar_getaway()],
        }
    }
}

#[async_trait]
impl TripCatalog for StubCatalog {
    async fn get_trip(&self, id: &TripId) -> Result<Option<Trip>, CatalogError> {
        Ok(self.trips.iter().find(|t| &t.id == id).cloned())
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, CatalogError> {
        Ok(self.trips.clone())
    }
}

/// Gateway issuing a fresh session URL per call.
#[derive(Default)]
pub struct StubGateway {
    calls: AtomicUsize,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_checkout_session(
        &self,
        _session: &NewCheckoutSession,
    ) -> Result<ProviderSession, GatewayError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ProviderSession {
            id: format!("cs_test_{}", n),
            url: Some(format!("https://checkout.stripe.com/c/pay/cs_test_{}", n)),
        })
    }
}

pub fn server() -> HttpServer<StubCatalog, StubGateway> {
    let service = CheckoutService::new(StubCatalog::with_lunar_getaway(), StubGateway::default());
    HttpServer::new(service, PUBLIC_KEY)
}

pub fn server_with_rate_limit(requests_per_minute: u32) -> HttpServer<StubCatalog, StubGateway> {
    let service = CheckoutService::new(StubCatalog::with_lunar_getaway(), StubGateway::default());
    HttpServer::with_rate_limit(service, PUBLIC_KEY, requests_per_minute)
}

pub fn server_with_rate_limiter(limiter: RateLimiterState) -> HttpServer<StubCatalog, StubGateway> {
    let service = CheckoutService::new(StubCatalog::with_lunar_getaway(), StubGateway::default());
    HttpServer::with_rate_limiter(service, PUBLIC_KEY, limiter)
}

pub fn checkout_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/create-checkout-session")
        .header("Content-Type", "application/json")
        .header("Origin", "https://stars.example")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
