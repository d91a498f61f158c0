//! HTTP Server configuration and startup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{MethodRouter, get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use stars_types::{PaymentGateway, TripCatalog};

use super::cors::cors_headers;
use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::CheckoutService;
use crate::openapi::ApiDoc;

/// Path the browser posts booking requests to.
pub const CHECKOUT_PATH: &str = "/api/create-checkout-session";
/// Netlify Functions path; still served so existing
/// front-ends keep working.
pub const LEGACY_CHECKOUT_PATH: &str = "/.netlify/functions/create-checkout-session";

/// HTTP Server for the booking API.
pub struct HttpServer<C: TripCatalog, G: PaymentGateway> {
    state: Arc<AppState<C, G>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<C: TripCatalog, G: PaymentGateway> HttpServer<C, G> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: CheckoutService<C, G>, stripe_public_key: impl Into<String>) -> Self {
        Self {
            state: Arc::new(AppState {
                service,
                stripe_public_key: stripe_public_key.into(),
            }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(
        service: CheckoutService<C, G>,
        stripe_public_key: impl Into<String>,
        requests_per_minute: u32,
    ) -> Self {
        Self::with_rate_limiter(
            service,
            stripe_public_key,
            RateLimiterState::per_minute(requests_per_minute),
        )
    }

    /// Creates a new HTTP server with a preconfigured rate limiter.
    pub fn with_rate_limiter(
        service: CheckoutService<C, G>,
        stripe_public_key: impl Into<String>,
        rate_limiter: RateLimiterState,
    ) -> Self {
        Self {
            rate_limiter: Arc::new(rate_limiter),
            ..Self::new(service, stripe_public_key)
        }
    }

    fn checkout_route() -> MethodRouter<Arc<AppState<C, G>>> {
        post(handlers::create_checkout_session::<C, G>)
            .options(handlers::preflight)
            .fallback(handlers::method_not_allowed)
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        let api = Router::new()
            .route("/health", get(handlers::health))
            .route(CHECKOUT_PATH, Self::checkout_route())
            .route(LEGACY_CHECKOUT_PATH, Self::checkout_route())
            .route("/api/trips", get(handlers::list_trips::<C, G>))
            .route("/api/trips/{id}", get(handlers::get_trip::<C, G>))
            .route("/api/config", get(handlers::public_config::<C, G>))
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(middleware::map_response(cors_headers))
            .with_state(self.state.clone());

        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .merge(api)
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
