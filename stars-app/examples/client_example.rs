//! Client example demonstrating the booking flow against a running server.
//!
//! A local stand-in for the Stripe API is started alongside the server so
//! the example runs without network access or real keys.
//!
//! Run with: cargo run -p stars-app --example client_example --no-default-features --features sqlite

use std::net::SocketAddr;

use axum::{Json, Router, routing::post};
use serde_json::json;
use stars_client::StarsClient;
use stars_hex::{CheckoutService, inbound::HttpServer};
use stars_repo::SqliteCatalog;
use stars_stripe::{StripeConfig, StripeGateway};
use stars_types::{Trip, TripId};
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Fake Stripe: every session gets a fresh id
    let stripe = Router::new().route(
        "/v1/checkout/sessions",
        post(|| async {
            let id = format!("cs_test_{}", std::process::id());
            Json(json!({
                "id": id,
                "url": format!("https://checkout.stripe.com/c/pay/{}", id),
            }))
        }),
    );
    let stripe_listener = TcpListener::bind("127.0.0.1:0").await?;
    let stripe_addr: SocketAddr = stripe_listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(stripe_listener, stripe).await {
            eprintln!("fake Stripe stopped: {e}");
        }
    });

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("stars.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let catalog = SqliteCatalog::new(&db_url).await?;
    catalog
        .insert_trip(&Trip {
            id: TripId::new("lunar-getaway"),
            title: "Lunar Getaway".into(),
            description: "A week in lunar orbit".into(),
            duration: "7 days".into(),
            price: 250000,
            image_url: "https://images.example.com/moon.jpg".into(),
            available_seats: 12,
            departure_dates: vec!["2025-06-01".into(), "2025-07-01".into()],
            created_at: None,
        })
        .await?;

    let gateway = StripeGateway::new(StripeConfig {
        api_base: format!("http://{stripe_addr}"),
        ..StripeConfig::new("sk_test_example")
    })?;

    let service = CheckoutService::new(catalog, gateway);
    let server = HttpServer::new(service, "pk_test_example");
    let router = server.router();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    println!("🚀 Server on {addr}, database {db_url}");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server stopped: {e}");
        }
    });

    let client = StarsClient::new(format!("http://{addr}")).with_origin("https://stars.example");

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let config = client.public_config().await?;
    println!("✅ Publishable key: {}", config.stripe_public_key);

    println!("\n📋 Trips:");
    for trip in client.list_trips().await? {
        println!(
            "   - {} ({}): ${:.2}, departures {:?}",
            trip.title,
            trip.id,
            trip.price as f64 / 100.0,
            trip.departure_dates
        );
    }

    let rejected = client
        .create_checkout_session("lunar-getaway", "2031-01-01")
        .await;
    println!("✅ Unlisted departure rejected: {}", rejected.is_err());

    let session = client
        .create_checkout_session("lunar-getaway", "2025-06-01")
        .await?;
    println!("✅ Checkout session: {}", session.url);

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
