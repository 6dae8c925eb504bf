//! The rule type and ordered rule evaluation

use chrono::{DateTime, Utc};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::custom::{FnValidator, Validator};
use crate::result::{combine, ValidationResult};
use crate::{date, numeric, string};
use model_forms_types::FieldValue;

/// One atomic check over a single property value.
///
/// Rules outside their domain pass: `MinLength` on a number, `DateRange` on a
/// string, `NumericRange` on an absent value.
#[derive(Clone)]
pub enum ValidationRule {
    /// Fails on an absent value or a blank string
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// Inclusive bounds; integers are widened for the comparison
    NumericRange { min: f64, max: f64 },
    /// Inclusive bounds
    DateRange {
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
    },
    /// String must match `regex`
    Pattern { regex: Regex, message: String },
    Custom(Arc<dyn Validator>),
}

impl ValidationRule {
    pub fn numeric_range(min: f64, max: f64) -> Self {
        ValidationRule::NumericRange { min, max }
    }

    pub fn date_range(earliest: DateTime<Utc>, latest: DateTime<Utc>) -> Self {
        ValidationRule::DateRange { earliest, latest }
    }

    pub fn pattern(expr: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(ValidationRule::Pattern {
            regex: Regex::new(expr)?,
            message: message.into(),
        })
    }

    /// Wrap a closure as a named custom rule
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(Option<&FieldValue>) -> ValidationResult + 'static,
    {
        ValidationRule::Custom(Arc::new(FnValidator::new(name, check)))
    }

    /// Stable rule name for logs
    pub fn name(&self) -> &str {
        match self {
            ValidationRule::Required => "required",
            ValidationRule::MinLength(_) => "min_length",
            ValidationRule::MaxLength(_) => "max_length",
            ValidationRule::NumericRange { .. } => "numeric_range",
            ValidationRule::DateRange { .. } => "date_range",
            ValidationRule::Pattern { .. } => "pattern",
            ValidationRule::Custom(validator) => validator.name(),
        }
    }

    pub fn validate(&self, value: Option<&FieldValue>) -> ValidationResult {
        match (self, value) {
            (ValidationRule::Required, None) => {
                ValidationResult::failure("This field is required")
            }
            (ValidationRule::Required, Some(FieldValue::String(s))) => {
                string::validate_not_blank(s).into()
            }
            (ValidationRule::Required, Some(_)) => ValidationResult::Success,

            (ValidationRule::MinLength(min), Some(FieldValue::String(s))) => {
                string::validate_min_length(s, *min).into()
            }
            (ValidationRule::MaxLength(max), Some(FieldValue::String(s))) => {
                string::validate_max_length(s, *max).into()
            }

            (ValidationRule::NumericRange { min, max }, Some(FieldValue::Integer(i))) => {
                numeric::validate_integer_range(*i, *min, *max).into()
            }
            (ValidationRule::NumericRange { min, max }, Some(FieldValue::Real(r))) => {
                numeric::validate_range(*r, *min, *max).into()
            }

            (ValidationRule::DateRange { earliest, latest }, Some(FieldValue::Timestamp(ts))) => {
                date::validate_date_range(*ts, *earliest, *latest).into()
            }

            (ValidationRule::Pattern { regex, message }, Some(FieldValue::String(s))) => {
                string::validate_pattern(s, regex, message).into()
            }

            (ValidationRule::Custom(validator), value) => validator.validate(value),

            // Outside the rule's domain
            _ => ValidationResult::Success,
        }
    }
}

/// Run rules in order and return the first failure
pub fn validate_all(rules: &[ValidationRule], value: Option<&FieldValue>) -> ValidationResult {
    combine(rules.iter().map(|rule| rule.validate(value)))
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::Required => write!(f, "Required"),
            ValidationRule::MinLength(n) => write!(f, "MinLength({})", n),
            ValidationRule::MaxLength(n) => write!(f, "MaxLength({})", n),
            ValidationRule::NumericRange { min, max } => {
                write!(f, "NumericRange({}, {})", min, max)
            }
            ValidationRule::DateRange { earliest, latest } => write!(
                f,
                "DateRange({}, {})",
                earliest.to_rfc3339(),
                latest.to_rfc3339()
            ),
            ValidationRule::Pattern { regex, .. } => write!(f, "Pattern({})", regex.as_str()),
            ValidationRule::Custom(validator) => write!(f, "Custom({})", validator.name()),
        }
    }
}

impl PartialEq for ValidationRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValidationRule::Required, ValidationRule::Required) => true,
            (ValidationRule::MinLength(a), ValidationRule::MinLength(b)) => a == b,
            (ValidationRule::MaxLength(a), ValidationRule::MaxLength(b)) => a == b,
            (
                ValidationRule::NumericRange { min: a_min, max: a_max },
                ValidationRule::NumericRange { min: b_min, max: b_max },
            ) => a_min == b_min && a_max == b_max,
            (
                ValidationRule::DateRange { earliest: a_from, latest: a_to },
                ValidationRule::DateRange { earliest: b_from, latest: b_to },
            ) => a_from == b_from && a_to == b_to,
            (
                ValidationRule::Pattern { regex: a, message: a_msg },
                ValidationRule::Pattern { regex: b, message: b_msg },
            ) => a.as_str() == b.as_str() && a_msg == b_msg,
            (ValidationRule::Custom(a), ValidationRule::Custom(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}
