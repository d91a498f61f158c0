//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

use stars_types::{
    AppError, CheckoutRequest, ErrorResponse, PaymentGateway, PublicConfigResponse, TripCatalog,
    TripId,
};

use crate::CheckoutService;

pub const MISSING_BODY: &str = "Missing request body";

/// Application state shared across handlers.
pub struct AppState<C: TripCatalog, G: PaymentGateway> {
    pub service: CheckoutService<C, G>,
    pub stripe_public_key: String,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = ErrorResponse {
            error: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Create a hosted checkout session for a trip departure.
///
/// The body is parsed by hand so that an empty or malformed body is reported
/// in the same `{error}` shape as every other failure.
#[tracing::instrument(skip(state, headers, body), fields(origin))]
pub async fn create_checkout_session<C: TripCatalog, G: PaymentGateway>(
    State(state): State<Arc<AppState<C, G>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());
    if let Some(origin) = origin {
        tracing::Span::current().record("origin", origin);
    }

    let req = parse_checkout_body(&body).inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected checkout request body");
    })?;

    let session = state
        .service
        .create_checkout_session(req, origin)
        .await
        .inspect_err(|e| {
            tracing::warn!(status = e.status_code(), error = %e, "Checkout failed");
        })?;

    Ok(Json(session))
}

fn parse_checkout_body(body: &[u8]) -> Result<CheckoutRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest(MISSING_BODY.into()));
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}

/// CORS preflight: 200 with an empty body.
pub async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}

/// Any method other than POST/OPTIONS on the checkout route.
pub async fn method_not_allowed() -> ApiError {
    ApiError(AppError::MethodNotAllowed)
}

/// List all trips, oldest first.
#[tracing::instrument(skip(state))]
pub async fn list_trips<C: TripCatalog, G: PaymentGateway>(
    State(state): State<Arc<AppState<C, G>>>,
) -> Result<impl IntoResponse, ApiError> {
    let trips = state.service.list_trips().await?;
    Ok(Json(trips))
}

/// Get trip by ID.
#[tracing::instrument(skip(state), fields(trip_id = %id))]
pub async fn get_trip<C: TripCatalog, G: PaymentGateway>(
    State(state): State<Arc<AppState<C, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let trip = state.service.get_trip(&TripId::new(id)).await?;
    Ok(Json(trip))
}

/// Public configuration for the browser-side payment widget.
pub async fn public_config<C: TripCatalog, G: PaymentGateway>(
    State(state): State<Arc<AppState<C, G>>>,
) -> impl IntoResponse {
    Json(PublicConfigResponse {
        stripe_public_key: state.stripe_public_key.clone(),
    })
}
