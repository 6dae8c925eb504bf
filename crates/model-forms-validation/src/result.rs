//! Validation outcome and short-circuit composition

/// Outcome of running one rule, or a whole rule list, against a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Success,
    Failure(String),
}

impl ValidationResult {
    pub fn failure(message: impl Into<String>) -> Self {
        ValidationResult::Failure(message.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Success)
    }

    /// Failure message, `None` on success
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Success => None,
            ValidationResult::Failure(message) => Some(message),
        }
    }

    /// Convert to the `Result<(), String>` shape used by the free validators
    pub fn into_result(self) -> Result<(), String> {
        match self {
            ValidationResult::Success => Ok(()),
            ValidationResult::Failure(message) => Err(message),
        }
    }
}

impl From<Result<(), String>> for ValidationResult {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => ValidationResult::Success,
            Err(message) => ValidationResult::Failure(message),
        }
    }
}

/// First failure in order, or `Success` when every result passed.
///
/// Stops pulling from the iterator at the first failure, so a lazy iterator of
/// rule evaluations only runs rules up to the one that fails.
pub fn combine<I>(results: I) -> ValidationResult
where
    I: IntoIterator<Item = ValidationResult>,
{
    results
        .into_iter()
        .find(|result| !result.is_valid())
        .unwrap_or(ValidationResult::Success)
}
