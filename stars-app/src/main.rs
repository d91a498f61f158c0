//! # Stars Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the trip catalog adapter
//! - Initialize the Stripe gateway
//! - Create the checkout service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stars_hex::{
    CheckoutService, Timeouts,
    inbound::{HttpServer, RateLimiterState},
};
use stars_repo::build_catalog;
use stars_stripe::{StripeConfig, StripeGateway};

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("stars-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration before anything else so a bad setup fails fast
    let config = config::Config::from_env()?;

    let otel = config
        .otlp_endpoint
        .as_deref()
        .map(init_tracer)
        .transpose()?;
    let (telemetry, otel_provider) = match otel {
        Some((tracer, provider)) => (
            Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Some(provider),
        ),
        None => (None, None),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,stars_app=debug,stars_hex=debug,stars_repo=debug,stars_stripe=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting booking server on port {}", config.port);
    tracing::info!("Using trip catalog: {}", config.catalog_description());

    // Build catalog (handles connection and migration for databases)
    let catalog = build_catalog(&config.catalog, config.catalog_timeout).await?;

    let gateway = StripeGateway::new(StripeConfig {
        secret_key: config.stripe_secret_key.clone(),
        api_base: config.stripe_api_base.clone(),
        timeout: config.stripe_timeout,
    })?;

    // Create the checkout service
    let service = CheckoutService::with_timeouts(
        catalog,
        gateway,
        Timeouts {
            catalog: config.catalog_timeout,
            provider: config.stripe_timeout,
        },
    );

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limiter(
        service,
        config.stripe_public_key.clone(),
        RateLimiterState::per_minute(config.rate_limit_per_minute)
            .trust_forwarded_for(config.trust_forwarded_for),
    );
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
