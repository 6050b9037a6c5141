//! Application State

use std::sync::Arc;

use textjoy_checkout::CheckoutConfig;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    /// Endpoint and publishable key handed to the frontend (None if not configured)
    pub checkout: Option<Arc<CheckoutConfig>>,
}
