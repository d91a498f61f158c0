//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use stars_types::domain::{Trip, TripId};
use stars_types::dto::{
    CheckoutRequest, CheckoutSessionResponse, ErrorResponse, PublicConfigResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Create a hosted checkout session
#[utoipa::path(
    post,
    path = "/api/create-checkout-session",
    tag = "checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Session created; redirect the browser to `url`", body = CheckoutSessionResponse),
        (status = 400, description = "Missing fields, malformed body, or departure date not offered", body = ErrorResponse),
        (status = 404, description = "Trip not found", body = ErrorResponse, example = json!({"error": "Trip not found"})),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Catalog or payment provider failure", body = ErrorResponse)
    )
)]
async fn create_checkout_session() {}

/// CORS preflight for the checkout endpoint
#[utoipa::path(
    options,
    path = "/api/create-checkout-session",
    tag = "checkout",
    responses(
        (status = 200, description = "Empty body with CORS headers")
    )
)]
async fn checkout_preflight() {}

/// List all trips, oldest first
#[utoipa::path(
    get,
    path = "/api/trips",
    tag = "trips",
    responses(
        (status = 200, description = "List of trips", body = Vec<Trip>),
        (status = 500, description = "Catalog failure", body = ErrorResponse)
    )
)]
async fn list_trips() {}

/// Get trip by ID
#[utoipa::path(
    get,
    path = "/api/trips/{id}",
    tag = "trips",
    params(
        ("id" = String, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip found", body = Trip),
        (status = 404, description = "Trip not found", body = ErrorResponse),
        (status = 500, description = "Catalog failure", body = ErrorResponse)
    )
)]
async fn get_trip() {}

/// Public payment widget configuration
#[utoipa::path(
    get,
    path = "/api/config",
    tag = "config",
    responses(
        (status = 200, description = "Publishable keys", body = PublicConfigResponse)
    )
)]
async fn public_config() {}

/// OpenAPI documentation for the booking API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dubai to the Stars Booking API",
        version = "1.0.0",
        description = "Trip catalog reads and hosted checkout sessions for space tourism bookings.\n\nPOST a `{tripId, departureDate}` pair to `/api/create-checkout-session` and redirect the browser to the returned `url`.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_checkout_session,
        checkout_preflight,
        list_trips,
        get_trip,
        public_config,
    ),
    components(
        schemas(
            CheckoutRequest,
            CheckoutSessionResponse,
            ErrorResponse,
            PublicConfigResponse,
            Trip,
            TripId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "checkout", description = "Hosted payment sessions"),
        (name = "trips", description = "Trip catalog"),
        (name = "config", description = "Public client configuration"),
    )
)]
pub struct ApiDoc;
