//! HTTP Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use textjoy_checkout::CheckoutConfig;

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checkout_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        checkout_configured: state.checkout.is_some(),
    })
}

/// Runtime configuration read by the frontend at boot
pub async fn checkout_config(
    State(state): State<AppState>,
) -> Result<Json<CheckoutConfig>, (StatusCode, Json<ErrorResponse>)> {
    let config = state.checkout.as_ref().ok_or_else(|| {
        tracing::warn!("Checkout config requested but not configured");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Checkout not configured".into(),
                code: "CHECKOUT_DISABLED".into(),
            }),
        )
    })?;

    Ok(Json(CheckoutConfig::clone(config)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/api/config", get(checkout_config))
            .with_state(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_config_served_when_present() {
        let state = AppState {
            checkout: Some(Arc::new(CheckoutConfig::new(
                "https://api.example.com",
                "pk_test_123",
            ))),
        };

        let (status, body) = get_json(router(state), "/api/config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoint"], "https://api.example.com");
        assert_eq!(body["publishable_key"], "pk_test_123");
    }

    #[tokio::test]
    async fn test_config_unavailable_when_missing() {
        let (status, body) = get_json(router(AppState::default()), "/api/config").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "CHECKOUT_DISABLED");
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let (status, body) = get_json(router(AppState::default()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checkout_configured"], false);
    }
}
