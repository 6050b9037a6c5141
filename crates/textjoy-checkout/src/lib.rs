//! # textjoy-checkout
//!
//! Checkout form logic for TextJoy: the purchaser picks a message collection,
//! a recipient, a start date and a package, then pays through the hosted
//! Stripe Checkout widget.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐   valid   ┌─────────────────┐  token  ┌──────────────────┐
//! │  Checkout    │──────────▶│  Stripe widget  │────────▶│ PurchaseSubmitter│
//! │  (form +     │           │  (TokenRequester│         │  POST /purchase  │
//! │   validator) │◀──┐       │   seam)         │         └────────┬─────────┘
//! └──────────────┘   │       └─────────────────┘                  │
//!        ▲           └──────── first error shown inline           │ status
//!        └────────────────────────────────────────────────────────┘
//! ```
//!
//! The same [`Checkout`] drives both the monthly subscription form
//! ([`CheckoutOptions::subscription`]) and the gift form
//! ([`CheckoutOptions::gift`]).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use textjoy_checkout::{Checkout, CheckoutConfig, CheckoutOptions, PurchaseSubmitter};
//!
//! let config = CheckoutConfig::from_env()?;
//! let mut checkout = Checkout::new(CheckoutOptions::subscription(), detected_tz);
//!
//! // Blocks with an inline error if the form is incomplete
//! let request = checkout.prepare_payment(&config.publishable_key)?;
//!
//! // ... widget returns `token` ...
//! let order = checkout.place_order()?;
//! let status = PurchaseSubmitter::new(&config).submit(&order, token).await;
//! checkout.complete(&status)?;
//! ```

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod dates;
pub mod error;
pub mod form;
pub mod package;
pub mod payment;
pub mod phone;
pub mod purchase;
pub mod validation;

pub use checkout::{Checkout, CheckoutCopy, CheckoutOptions, SubmissionStatus, WidgetBranding};
pub use config::CheckoutConfig;
pub use error::{CheckoutError, Result};
pub use form::{Field, FieldUpdate, FormState, FormValues};
pub use package::{Currency, Package, PackageCatalog, PackageId, PackageSelection, Price};
pub use payment::{PaymentToken, TokenCallback, TokenRequest, TokenRequester};
pub use purchase::{
    AnalyticsHook, Order, PurchaseEvent, PurchaseMetadata, PurchaseRequest, PurchaseStatus,
    PurchaseSubmitter,
};
pub use validation::ValidationError;
