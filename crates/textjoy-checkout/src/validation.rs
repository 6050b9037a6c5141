//! Field Validation
//!
//! Ordered, fail-fast checks run when the purchaser presses the buy button.
//! Only the first failing rule is reported.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::form::{Field, FormValues};
use crate::phone;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid hardcoded regex")
});

/// Order rules are checked in
pub const RULE_ORDER: [Field; 5] = [
    Field::RecipientFirstName,
    Field::RecipientPhoneNumber,
    Field::RecipientTimezone,
    Field::CustomerName,
    Field::CustomerEmail,
];

/// The one problem shown next to its field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    fn for_field(field: Field) -> Self {
        Self {
            field,
            message: required_message(field).to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Message shown when a required field fails its check
pub const fn required_message(field: Field) -> &'static str {
    match field {
        Field::RecipientFirstName => "Please enter your friends first name",
        Field::RecipientPhoneNumber => "Please enter your friends phone number",
        Field::RecipientTimezone => "Please select your friends timezone",
        Field::CustomerName => "Please enter your full name",
        Field::CustomerEmail => "Please enter your email address",
        Field::StartDate => "Please choose a start date",
        Field::Package => "Please choose a package",
    }
}

fn passes(field: Field, values: &FormValues) -> bool {
    match field {
        Field::RecipientFirstName => !values.recipient_first_name.is_empty(),
        Field::RecipientPhoneNumber => phone::is_valid_phone_number(&values.recipient_phone_number),
        Field::RecipientTimezone => values
            .recipient_timezone
            .as_ref()
            .is_some_and(|tz| !tz.name.is_empty()),
        Field::CustomerName => !values.customer_name.is_empty(),
        Field::CustomerEmail => EMAIL_RE.is_match(&values.customer_email),
        // Always populated by the pickers.
        Field::StartDate | Field::Package => true,
    }
}

/// First failing check among the `required` fields, in [`RULE_ORDER`]
pub fn validate(values: &FormValues, required: &[Field]) -> Option<ValidationError> {
    RULE_ORDER
        .iter()
        .copied()
        .filter(|field| required.contains(field))
        .find(|field| !passes(*field, values))
        .map(ValidationError::for_field)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;
    use crate::catalog::detected_timezone;
    use crate::package::PackageCatalog;

    const SUBSCRIPTION_RULES: &[Field] = &[
        Field::RecipientFirstName,
        Field::RecipientPhoneNumber,
        Field::RecipientTimezone,
        Field::CustomerName,
    ];

    fn valid_values() -> FormValues {
        let today = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        FormValues {
            recipient_first_name: "Chloe".into(),
            recipient_phone_number: "+447400123456".into(),
            recipient_timezone: detected_timezone(Some("Europe/London")),
            customer_name: "Sam Smith".into(),
            ..FormValues::initial(&PackageCatalog::subscription(), None, today)
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(validate(&valid_values(), SUBSCRIPTION_RULES), None);
    }

    #[test]
    fn test_missing_first_name() {
        let values = FormValues {
            recipient_first_name: String::new(),
            ..valid_values()
        };
        assert_eq!(
            validate(&values, SUBSCRIPTION_RULES),
            Some(ValidationError {
                field: Field::RecipientFirstName,
                message: "Please enter your friends first name".into(),
            })
        );
    }

    #[test]
    fn test_bad_phone_number() {
        let values = FormValues {
            recipient_phone_number: "07911".into(),
            ..valid_values()
        };
        let err = validate(&values, SUBSCRIPTION_RULES).unwrap();
        assert_eq!(err.field, Field::RecipientPhoneNumber);
        assert_eq!(err.message, "Please enter your friends phone number");
    }

    #[test]
    fn test_empty_timezone_selection() {
        let values = FormValues {
            recipient_timezone: None,
            ..valid_values()
        };
        let err = validate(&values, SUBSCRIPTION_RULES).unwrap();
        assert_eq!(err.field, Field::RecipientTimezone);
        assert_eq!(err.message, "Please select your friends timezone");
    }

    #[test]
    fn test_missing_customer_name() {
        let values = FormValues {
            customer_name: String::new(),
            ..valid_values()
        };
        let err = validate(&values, SUBSCRIPTION_RULES).unwrap();
        assert_eq!(err.field, Field::CustomerName);
        assert_eq!(err.message, "Please enter your full name");
    }

    #[test]
    fn test_earliest_rule_wins() {
        let values = FormValues {
            recipient_phone_number: String::new(),
            customer_name: String::new(),
            recipient_timezone: None,
            ..valid_values()
        };
        assert_eq!(
            validate(&values, SUBSCRIPTION_RULES).unwrap().field,
            Field::RecipientPhoneNumber
        );
    }

    #[test]
    fn test_email_only_checked_when_required() {
        let values = valid_values();
        assert_eq!(validate(&values, SUBSCRIPTION_RULES), None);

        let mut gift_rules = SUBSCRIPTION_RULES.to_vec();
        gift_rules.push(Field::CustomerEmail);
        assert_eq!(
            validate(&values, &gift_rules).unwrap().field,
            Field::CustomerEmail
        );

        let values = FormValues {
            customer_email: "sam@example.com".into(),
            ..values
        };
        assert_eq!(validate(&values, &gift_rules), None);
    }

    proptest! {
        #[test]
        fn missing_first_name_always_reported_first(
            phone in "\\PC{0,16}",
            customer in "\\PC{0,12}",
            has_timezone in any::<bool>(),
        ) {
            let values = FormValues {
                recipient_first_name: String::new(),
                recipient_phone_number: phone,
                customer_name: customer,
                recipient_timezone: if has_timezone { valid_values().recipient_timezone } else { None },
                ..valid_values()
            };
            let err = validate(&values, SUBSCRIPTION_RULES);
            prop_assert_eq!(err.map(|e| e.field), Some(Field::RecipientFirstName));
        }

        #[test]
        fn well_formed_inputs_pass(
            first in "[A-Za-z]{1,12}",
            customer in "[A-Za-z ]{1,20}",
            national in "[0-9]{6}",
            tz_index in 0..crate::catalog::TIMEZONES.len(),
        ) {
            let values = FormValues {
                recipient_first_name: first,
                recipient_phone_number: format!("+447400{national}"),
                recipient_timezone: Some(crate::catalog::TIMEZONES[tz_index].selection()),
                customer_name: customer,
                ..valid_values()
            };
            prop_assert_eq!(validate(&values, SUBSCRIPTION_RULES), None);
        }
    }
}
