//! Purchase Submission
//!
//! Sends the order and the widget's payment token to the purchase endpoint.
//! The endpoint exchanges the token for a charge; this side only reports what
//! the endpoint said.
//!
//! ```text
//! POST {endpoint}/purchase
//! {
//!   "amount": 299,
//!   "currency": "GBP",
//!   "idempotency_key": "3f0c…",
//!   "token": { … },
//!   "metadata": { "recipientFirstName": "Chloe", … }
//! }
//!
//! ← { "status": "succeeded" }
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CollectionId;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::form::FormValues;
use crate::package::{Currency, PackageId, Price};
use crate::payment::PaymentToken;

/// Form values flattened for the endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseMetadata {
    pub recipient_first_name: String,
    pub recipient_phone_number: String,
    /// IANA timezone name
    pub recipient_timezone: String,
    pub customer_name: String,
    pub start_date: NaiveDate,
    pub package: PackageId,
    pub collection_id: CollectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

impl PurchaseMetadata {
    pub fn from_form(values: &FormValues, collection_id: CollectionId, include_email: bool) -> Self {
        Self {
            recipient_first_name: values.recipient_first_name.clone(),
            recipient_phone_number: values.recipient_phone_number.clone(),
            recipient_timezone: values
                .recipient_timezone
                .as_ref()
                .map(|tz| tz.name.clone())
                .unwrap_or_default(),
            customer_name: values.customer_name.clone(),
            start_date: values.start_date,
            package: values.package.id.clone(),
            collection_id,
            customer_email: include_email.then(|| values.customer_email.clone()),
        }
    }
}

/// What is being bought, captured when the token arrives
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub price: Price,
    pub metadata: PurchaseMetadata,
}

/// Request body posted to the endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub amount: u32,
    pub currency: Currency,
    pub idempotency_key: Uuid,
    pub token: PaymentToken,
    pub metadata: PurchaseMetadata,
}

impl PurchaseRequest {
    /// Every request gets a fresh idempotency key, so a resubmission is a new
    /// purchase attempt rather than a retry of the previous one.
    pub fn new(price: Price, token: PaymentToken, metadata: PurchaseMetadata) -> Self {
        Self {
            amount: price.minor_units,
            currency: price.currency,
            idempotency_key: Uuid::new_v4(),
            token,
            metadata,
        }
    }
}

/// Status reported by the endpoint, kept verbatim
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PurchaseStatus {
    Succeeded,
    Failed,
    Other(String),
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for PurchaseStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            _ => Self::Other(status),
        }
    }
}

impl From<PurchaseStatus> for String {
    fn from(status: PurchaseStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct PurchaseResponse {
    status: PurchaseStatus,
}

/// Purchase analytics event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PurchaseEvent {
    /// Amount in minor currency units
    pub value: u32,
    pub currency: Currency,
}

/// Optional analytics sink notified of completed purchases
pub trait AnalyticsHook: Send + Sync {
    fn track_purchase(&self, event: &PurchaseEvent);
}

/// Posts purchases to the configured endpoint
#[derive(Clone)]
pub struct PurchaseSubmitter {
    client: reqwest::Client,
    purchase_url: String,
    analytics: Option<Arc<dyn AnalyticsHook>>,
}

impl PurchaseSubmitter {
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            purchase_url: config.purchase_url(),
            analytics: None,
        }
    }

    #[must_use]
    pub fn with_analytics(mut self, hook: Arc<dyn AnalyticsHook>) -> Self {
        self.analytics = Some(hook);
        self
    }

    /// Submit an order and report the endpoint's verdict
    ///
    /// Never fails: transport and endpoint problems are logged and reported as
    /// [`PurchaseStatus::Failed`].
    pub async fn submit(&self, order: &Order, token: PaymentToken) -> PurchaseStatus {
        let request = PurchaseRequest::new(order.price, token, order.metadata.clone());

        tracing::info!(
            idempotency_key = %request.idempotency_key,
            amount = request.amount,
            package = %request.metadata.package,
            "Submitting purchase"
        );

        match self.send(&request).await {
            Ok(status) => {
                if status == PurchaseStatus::Succeeded {
                    self.track(order.price);
                } else {
                    tracing::warn!(
                        idempotency_key = %request.idempotency_key,
                        status = %status,
                        "Purchase not completed"
                    );
                }
                status
            }
            Err(e) => {
                tracing::error!(
                    idempotency_key = %request.idempotency_key,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Purchase request failed"
                );
                PurchaseStatus::Failed
            }
        }
    }

    /// Post one request and decode the response status
    pub async fn send(&self, request: &PurchaseRequest) -> Result<PurchaseStatus> {
        let response = self
            .client
            .post(&self.purchase_url)
            .json(request)
            .send()
            .await?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(CheckoutError::Endpoint(http_status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: PurchaseResponse = serde_json::from_slice(&body)?;

        tracing::info!(status = %parsed.status, "Purchase endpoint responded");
        Ok(parsed.status)
    }

    fn track(&self, price: Price) {
        if let Some(hook) = &self.analytics {
            hook.track_purchase(&PurchaseEvent {
                value: price.minor_units,
                currency: price.currency,
            });
        }
    }
}
