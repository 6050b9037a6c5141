//! Payment Token Requests
//!
//! The hosted payment widget is opaque: it is opened with an amount and some
//! branding, and, if the purchaser completes it, hands back a single-use
//! token. Abandoning the widget produces nothing at all.

use serde::{Deserialize, Serialize};

use crate::package::Currency;

/// Single-use token issued by the payment widget
///
/// Passed through to the purchase endpoint untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentToken(serde_json::Value);

impl PaymentToken {
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Token id, when the widget supplies one
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(serde_json::Value::as_str)
    }
}

/// Parameters the widget is opened with
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
    pub publishable_key: String,

    /// Amount in minor currency units
    pub amount: u32,
    pub currency: Currency,

    /// Merchant name shown in the widget header
    pub name: String,
    pub description: String,
    pub image: String,
    pub locale: String,

    /// Prefilled purchaser email
    #[serde(default)]
    pub email: Option<String>,

    /// Pay button label override
    #[serde(default)]
    pub panel_label: Option<String>,
}

/// Invoked at most once with the issued token
pub type TokenCallback = Box<dyn FnOnce(PaymentToken)>;

/// Opens the hosted payment widget
pub trait TokenRequester {
    /// Open the widget; `on_token` runs only if the purchaser completes it.
    fn request_token(&self, request: TokenRequest, on_token: TokenCallback);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_opaque_json() {
        let token = PaymentToken::new(serde_json::json!({"id": "tok_123", "card": {"last4": "4242"}}));
        assert_eq!(token.id(), Some("tok_123"));
        assert_eq!(
            serde_json::to_value(&token).unwrap()["card"]["last4"],
            "4242"
        );
    }
}
