//! Checkout Error Types

use thiserror::Error;

use crate::checkout::SubmissionStatus;
use crate::validation::ValidationError;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout-related errors
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Form failed validation; shown inline, never logged
    #[error("{0}")]
    Invalid(ValidationError),

    /// Missing or malformed deployment configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Package id not present in the catalog
    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    /// Collection id not present in the catalog
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Submission status change that the checkout does not allow
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: SubmissionStatus,
        to: SubmissionStatus,
    },

    /// Network failure talking to the purchase endpoint
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Purchase endpoint answered with a non-success HTTP status
    #[error("Purchase endpoint returned HTTP {0}")]
    Endpoint(u16),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CheckoutError {
    /// Check if this error is retryable
    ///
    /// The submitter never retries on its own; this only tells the caller
    /// whether offering the user another attempt makes sense.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Endpoint(_))
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            Self::Invalid(e) => &e.message,
            Self::Transport(_) | Self::Endpoint(_) | Self::Decode(_) => {
                "Something went wrong... we're really sorry"
            }
            Self::Config(_) => "Checkout is not available right now.",
            _ => "An error occurred processing your request.",
        }
    }
}
