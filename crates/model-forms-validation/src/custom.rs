//! Caller-supplied validation strategies

use std::fmt;

use crate::result::ValidationResult;
use model_forms_types::FieldValue;

/// A named validation strategy for `ValidationRule::Custom`.
///
/// The name identifies the rule in logs and is what two custom rules are
/// compared by.
pub trait Validator {
    fn name(&self) -> &str;

    fn validate(&self, value: Option<&FieldValue>) -> ValidationResult;
}

/// [`Validator`] backed by a closure
pub struct FnValidator<F> {
    name: String,
    check: F,
}

impl<F> FnValidator<F>
where
    F: Fn(Option<&FieldValue>) -> ValidationResult,
{
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(Option<&FieldValue>) -> ValidationResult,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: Option<&FieldValue>) -> ValidationResult {
        (self.check)(value)
    }
}

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_validator() {
        let positive = FnValidator::new("positive", |value: Option<&FieldValue>| {
            match value.and_then(FieldValue::as_f64) {
                Some(n) if n <= 0.0 => ValidationResult::failure("must be positive"),
                _ => ValidationResult::Success,
            }
        });

        assert_eq!(positive.name(), "positive");
        assert!(positive.validate(Some(&FieldValue::Real(2.0))).is_valid());
        assert!(!positive.validate(Some(&FieldValue::Integer(-1))).is_valid());
        assert!(positive.validate(None).is_valid());
        assert_eq!(format!("{:?}", positive), "FnValidator { name: \"positive\", .. }");
    }
}
