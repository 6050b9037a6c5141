//! Form State
//!
//! Holds every field of the checkout form for the current page session.
//! Updates never validate; that happens on submit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, TimezoneSelection};
use crate::dates;
use crate::package::{PackageCatalog, PackageSelection};

/// Form fields, in the order they appear on the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    RecipientFirstName,
    RecipientPhoneNumber,
    RecipientTimezone,
    StartDate,
    CustomerName,
    CustomerEmail,
    Package,
}

impl Field {
    /// Element id used by the form
    pub const fn id(self) -> &'static str {
        match self {
            Self::RecipientFirstName => "recipientFirstName",
            Self::RecipientPhoneNumber => "recipientPhoneNumber",
            Self::RecipientTimezone => "recipientTimezone",
            Self::StartDate => "startDate",
            Self::CustomerName => "customerName",
            Self::CustomerEmail => "customerEmail",
            Self::Package => "package",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A single field replacement
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    RecipientFirstName(String),
    RecipientPhoneNumber(String),
    RecipientTimezone(Option<TimezoneSelection>),
    StartDate(NaiveDate),
    CustomerName(String),
    CustomerEmail(String),
    Package(PackageSelection),
}

impl FieldUpdate {
    pub const fn field(&self) -> Field {
        match self {
            Self::RecipientFirstName(_) => Field::RecipientFirstName,
            Self::RecipientPhoneNumber(_) => Field::RecipientPhoneNumber,
            Self::RecipientTimezone(_) => Field::RecipientTimezone,
            Self::StartDate(_) => Field::StartDate,
            Self::CustomerName(_) => Field::CustomerName,
            Self::CustomerEmail(_) => Field::CustomerEmail,
            Self::Package(_) => Field::Package,
        }
    }
}

/// Everything the purchaser has entered
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub recipient_first_name: String,
    pub recipient_phone_number: String,
    pub recipient_timezone: Option<TimezoneSelection>,
    pub customer_name: String,
    pub start_date: NaiveDate,
    pub package: PackageSelection,
    /// Only collected by the gift checkout
    pub customer_email: String,
}

impl FormValues {
    /// Defaults for a fresh form
    pub fn initial(
        packages: &PackageCatalog,
        detected_timezone: Option<&str>,
        today: NaiveDate,
    ) -> Self {
        Self {
            recipient_first_name: String::new(),
            recipient_phone_number: String::new(),
            recipient_timezone: catalog::detected_timezone(detected_timezone),
            customer_name: String::new(),
            start_date: today,
            package: packages.default_package().selection(),
            customer_email: String::new(),
        }
    }

    /// Copy of these values with one field replaced
    #[must_use]
    pub fn with(self, update: FieldUpdate) -> Self {
        match update {
            FieldUpdate::RecipientFirstName(v) => Self { recipient_first_name: v, ..self },
            FieldUpdate::RecipientPhoneNumber(v) => Self { recipient_phone_number: v, ..self },
            FieldUpdate::RecipientTimezone(v) => Self { recipient_timezone: v, ..self },
            FieldUpdate::StartDate(v) => Self { start_date: v, ..self },
            FieldUpdate::CustomerName(v) => Self { customer_name: v, ..self },
            FieldUpdate::CustomerEmail(v) => Self { customer_email: v, ..self },
            FieldUpdate::Package(v) => Self { package: v, ..self },
        }
    }
}

/// Form state holder for one page session
#[derive(Clone, Debug)]
pub struct FormState {
    values: FormValues,
    packages: PackageCatalog,
    detected_timezone: Option<String>,
}

impl FormState {
    /// `detected_timezone` is the runtime's local IANA zone, if known.
    pub fn new(packages: PackageCatalog, detected_timezone: Option<String>) -> Self {
        let values = FormValues::initial(&packages, detected_timezone.as_deref(), dates::today());
        Self {
            values,
            packages,
            detected_timezone,
        }
    }

    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn set(&mut self, update: FieldUpdate) {
        self.values = self.values.clone().with(update);
    }

    /// Restore the initial defaults
    pub fn reset(&mut self) {
        self.values = self.initial_values();
    }

    fn initial_values(&self) -> FormValues {
        FormValues::initial(&self.packages, self.detected_timezone.as_deref(), dates::today())
    }
}
