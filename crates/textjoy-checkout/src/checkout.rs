//! Checkout Flow
//!
//! One parameterized checkout covers both the subscription form and the gift
//! form. It owns the form, the single active validation error and the
//! submission status.
//!
//! ```text
//!   set(..) ──▶ prepare_payment ──▶ widget ──▶ place_order ──▶ submit ──▶ complete
//!                    │ invalid                     │                        │
//!                    ▼                             ▼                        ▼
//!              error shown                      Loading           Succeeded / Failed
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Collection, CollectionId};
use crate::error::{CheckoutError, Result};
use crate::form::{Field, FieldUpdate, FormState, FormValues};
use crate::package::{PackageCatalog, Price};
use crate::payment::{TokenCallback, TokenRequest, TokenRequester};
use crate::purchase::{Order, PurchaseMetadata, PurchaseStatus};
use crate::validation::{self, ValidationError};

/// Progress of the purchase after the widget returns a token
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    None,
    Loading,
    Succeeded,
    Failed,
}

impl SubmissionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Allowed moves: `None | Failed → Loading`, `Loading → Succeeded | Failed`
    /// and `Succeeded → None` (explicit reset).
    pub const fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::None | Self::Failed, Self::Loading)
                | (Self::Loading, Self::Succeeded | Self::Failed)
                | (Self::Succeeded, Self::None)
        )
    }

    pub fn transition(self, to: Self) -> Result<Self> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(CheckoutError::InvalidTransition { from: self, to })
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the payment widget presents the merchant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetBranding {
    pub name: String,
    pub description: String,
    pub image: String,
    pub locale: String,
    pub panel_label: Option<String>,
}

/// Text shown by the form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutCopy {
    pub heading: String,
    pub form_title: String,
    pub buy_label: String,
    pub loading: String,
    pub succeeded: String,
    pub failed: String,
    pub finish_label: String,
}

impl Default for CheckoutCopy {
    fn default() -> Self {
        Self {
            heading: String::new(),
            form_title: String::new(),
            buy_label: "Buy Now".into(),
            loading: "Please wait...".into(),
            succeeded: "Purchase complete! Thank-you 🙏".into(),
            failed: "Something went wrong... we're really sorry".into(),
            finish_label: "Finish".into(),
        }
    }
}

const WIDGET_IMAGE: &str = "https://s3.eu-west-2.amazonaws.com/remoteone/stripe-icon.png";

/// Variant configuration for a checkout form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutOptions {
    pub packages: PackageCatalog,

    /// Fields that must pass validation before the widget opens
    pub required: Vec<Field>,

    /// Whether the purchaser's email is collected and sent
    pub collect_email: bool,

    pub branding: WidgetBranding,
    pub copy: CheckoutCopy,
}

impl CheckoutOptions {
    /// Monthly educational messages, six or twelve months
    pub fn subscription() -> Self {
        Self {
            packages: PackageCatalog::subscription(),
            required: vec![
                Field::RecipientFirstName,
                Field::RecipientPhoneNumber,
                Field::RecipientTimezone,
                Field::CustomerName,
            ],
            collect_email: false,
            branding: WidgetBranding {
                name: "TextJoy".into(),
                description: "Monthly Educational Text Messages".into(),
                image: WIDGET_IMAGE.into(),
                locale: "auto".into(),
                panel_label: None,
            },
            copy: CheckoutCopy {
                heading: "Educational Text Messages Delivered To Your Friends Every Month".into(),
                form_title: "Make a Friend Smile Today".into(),
                ..CheckoutCopy::default()
            },
        }
    }

    /// A fixed-price gifted collection
    pub fn gift() -> Self {
        Self {
            packages: PackageCatalog::gift(),
            required: vec![
                Field::RecipientFirstName,
                Field::RecipientPhoneNumber,
                Field::RecipientTimezone,
                Field::CustomerName,
                Field::CustomerEmail,
            ],
            collect_email: true,
            branding: WidgetBranding {
                name: "ThoughtfulSMS".into(),
                description: "Weekly thoughtful messages via SMS".into(),
                image: WIDGET_IMAGE.into(),
                locale: "auto".into(),
                panel_label: Some("Buy Gift".into()),
            },
            copy: CheckoutCopy {
                heading: "Make Someone Happy, Gift a Collection".into(),
                form_title: "Gift a Collection".into(),
                buy_label: "Buy Gift".into(),
                ..CheckoutCopy::default()
            },
        }
    }
}

/// Checkout state for one page session
#[derive(Clone, Debug)]
pub struct Checkout {
    options: CheckoutOptions,
    form: FormState,
    error: Option<ValidationError>,
    status: SubmissionStatus,
    collection_id: CollectionId,
}

impl Checkout {
    /// `detected_timezone` is the browser's IANA zone, if it could be read.
    pub fn new(options: CheckoutOptions, detected_timezone: Option<String>) -> Self {
        let form = FormState::new(options.packages.clone(), detected_timezone);
        Self {
            options,
            form,
            error: None,
            status: SubmissionStatus::None,
            collection_id: CollectionId::new(catalog::default_collection().id),
        }
    }

    pub const fn options(&self) -> &CheckoutOptions {
        &self.options
    }

    pub const fn values(&self) -> &FormValues {
        self.form.values()
    }

    pub const fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Whether the active error belongs to `field`
    pub fn has_error(&self, field: Field) -> bool {
        self.error.as_ref().is_some_and(|e| e.field == field)
    }

    pub const fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub const fn collection_id(&self) -> &CollectionId {
        &self.collection_id
    }

    pub fn collection(&self) -> Result<&'static Collection> {
        catalog::find_collection(&self.collection_id)
    }

    pub fn select_collection(&mut self, id: CollectionId) -> Result<()> {
        catalog::find_collection(&id)?;
        tracing::debug!(collection = %id, "Collection selected");
        self.collection_id = id;
        Ok(())
    }

    /// Update one field, dropping the error if it was about that field
    pub fn set(&mut self, update: FieldUpdate) {
        if self.has_error(update.field()) {
            self.error = None;
        }
        self.form.set(update);
    }

    /// Price of the selected package
    pub fn price(&self) -> Result<Price> {
        self.options.packages.resolve(&self.values().package.id)
    }

    pub fn validate(&self) -> Option<ValidationError> {
        validation::validate(self.values(), &self.options.required)
    }

    /// Validate and build the widget request
    ///
    /// A failed check is recorded as the active error and returned as
    /// [`CheckoutError::Invalid`]; the widget must not be opened.
    pub fn prepare_payment(&mut self, publishable_key: &str) -> Result<TokenRequest> {
        if !self.status.can_transition(SubmissionStatus::Loading) {
            return Err(CheckoutError::InvalidTransition {
                from: self.status,
                to: SubmissionStatus::Loading,
            });
        }

        if let Some(error) = self.validate() {
            self.error = Some(error.clone());
            return Err(CheckoutError::Invalid(error));
        }
        self.error = None;

        let price = self.price()?;
        let branding = &self.options.branding;
        Ok(TokenRequest {
            publishable_key: publishable_key.to_string(),
            amount: price.minor_units,
            currency: price.currency,
            name: branding.name.clone(),
            description: branding.description.clone(),
            image: branding.image.clone(),
            locale: branding.locale.clone(),
            email: self
                .options
                .collect_email
                .then(|| self.values().customer_email.clone()),
            panel_label: branding.panel_label.clone(),
        })
    }

    /// Validate, then open the widget only if the form is valid
    pub fn request_payment(
        &mut self,
        requester: &dyn TokenRequester,
        publishable_key: &str,
        on_token: TokenCallback,
    ) -> Result<()> {
        let request = self.prepare_payment(publishable_key)?;
        requester.request_token(request, on_token);
        Ok(())
    }

    /// Token received: move to `Loading` and capture the order
    pub fn place_order(&mut self) -> Result<Order> {
        let price = self.price()?;
        self.status = self.status.transition(SubmissionStatus::Loading)?;

        let metadata = PurchaseMetadata::from_form(
            self.values(),
            self.collection_id.clone(),
            self.options.collect_email,
        );
        tracing::debug!(amount = price.minor_units, "Order placed");
        Ok(Order { price, metadata })
    }

    /// Apply the endpoint's verdict
    ///
    /// Anything other than `succeeded` is shown as a failure.
    pub fn complete(&mut self, outcome: &PurchaseStatus) -> Result<SubmissionStatus> {
        let next = match outcome {
            PurchaseStatus::Succeeded => SubmissionStatus::Succeeded,
            PurchaseStatus::Failed | PurchaseStatus::Other(_) => SubmissionStatus::Failed,
        };
        self.status = self.status.transition(next)?;
        tracing::debug!(status = %self.status, outcome = %outcome, "Submission finished");
        Ok(self.status)
    }

    /// Purchaser acknowledged a completed purchase: start over
    pub fn finish(&mut self) -> Result<()> {
        self.status = self.status.transition(SubmissionStatus::None)?;
        self.error = None;
        self.form.reset();
        Ok(())
    }

    /// Banner text for the current status
    pub fn banner(&self) -> Option<&str> {
        let copy = &self.options.copy;
        match self.status {
            SubmissionStatus::None => None,
            SubmissionStatus::Loading => Some(&copy.loading),
            SubmissionStatus::Succeeded => Some(&copy.succeeded),
            SubmissionStatus::Failed => Some(&copy.failed),
        }
    }

    /// Banner that covers the form while a purchase is in flight or done
    pub fn overlay(&self) -> Option<&str> {
        match self.status {
            SubmissionStatus::Loading | SubmissionStatus::Succeeded => self.banner(),
            SubmissionStatus::None | SubmissionStatus::Failed => None,
        }
    }

    /// Apology shown inline under the form, which stays usable for another try
    pub fn failure(&self) -> Option<&str> {
        match self.status {
            SubmissionStatus::Failed => self.banner(),
            _ => None,
        }
    }
}
