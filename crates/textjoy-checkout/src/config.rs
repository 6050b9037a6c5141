//! Deployment Configuration
//!
//! The purchase endpoint and the payment provider's publishable key. Both are
//! provided by the environment at boot; their absence is a deployment error.

use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};

/// Environment variable holding the purchase endpoint base URL
pub const ENDPOINT_VAR: &str = "LAMBDA_ENDPOINT";

/// Environment variable holding the Stripe publishable key
pub const PUBLISHABLE_KEY_VAR: &str = "STRIPE_PUBLISHABLE_KEY";

/// Checkout configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Base URL of the purchase endpoint (without the `/purchase` suffix)
    pub endpoint: String,

    /// Publishable key handed to the payment widget
    pub publishable_key: String,
}

impl CheckoutConfig {
    pub fn new(endpoint: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            publishable_key: publishable_key.into(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(ENDPOINT_VAR)
            .map_err(|_| CheckoutError::Config(format!("{ENDPOINT_VAR} not set")))?;
        let publishable_key = std::env::var(PUBLISHABLE_KEY_VAR)
            .map_err(|_| CheckoutError::Config(format!("{PUBLISHABLE_KEY_VAR} not set")))?;

        Ok(Self::new(endpoint, publishable_key))
    }

    /// Full URL purchases are posted to
    pub fn purchase_url(&self) -> String {
        format!("{}/purchase", self.endpoint.trim_end_matches('/'))
    }
}
