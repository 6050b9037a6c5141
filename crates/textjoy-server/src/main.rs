//! TextJoy checkout server
//!
//! Serves the compiled WASM checkout and tells it where purchases go.
//! Payments themselves are exchanged by the purchase endpoint, not here.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use textjoy_checkout::CheckoutConfig;

use crate::handlers::{checkout_config, health_check};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let checkout = match CheckoutConfig::from_env() {
        Ok(config) => {
            tracing::info!(endpoint = %config.endpoint, "✓ Checkout configured");
            Some(Arc::new(config))
        }
        Err(e) => {
            tracing::warn!("⚠ {e} - checkout disabled");
            tracing::warn!("  Set LAMBDA_ENDPOINT and STRIPE_PUBLISHABLE_KEY in .env");
            None
        }
    };

    let state = AppState { checkout };
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/config", get(checkout_config))
        // Static files (WASM frontend); unknown paths get the app shell for client routing
        .fallback_service(
            ServeDir::new(&static_dir)
                .fallback(ServeFile::new(format!("{static_dir}/index.html"))),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 textjoy checkout running on http://{addr}");
    tracing::info!("  GET  /health     - Health check");
    tracing::info!("  GET  /api/config - Checkout configuration");
    tracing::info!("  GET  /*          - {static_dir}");

    axum::serve(listener, app).await?;

    Ok(())
}
