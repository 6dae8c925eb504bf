// File: src/error.rs
// Purpose: Error types for binding, persistence and the form lifecycle

use thiserror::Error;

use crate::form::FormState;
use crate::store::ValidationErrorMap;
use model_forms_types::AssignError;

/// Failure reported by a persistence collaborator
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The collaborator refused the entity (constraint, conflict, ...)
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("entity not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// An input could not be bound to a field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    #[error("{input} input does not fit a {field} field")]
    KindMismatch {
        input: &'static str,
        field: &'static str,
    },

    #[error("'{case}' is not a case of {case_set}")]
    UnknownCase { case_set: String, case: String },

    /// Stepping needs a numeric value in the store
    #[error("cannot step a non-numeric value")]
    NotNumeric,
}

/// Failure of a form operation. None of these closes the session.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form is read-only")]
    ReadOnly,

    #[error("form cannot be edited while {0}")]
    NotEditable(FormState),

    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrorMap),

    #[error("no property named '{0}'")]
    UnknownProperty(String),

    #[error("cannot bind '{property}': {source}")]
    Bind {
        property: String,
        #[source]
        source: BindError,
    },

    /// Building the entity from the store failed
    #[error(transparent)]
    Construction(#[from] AssignError),

    /// A lifecycle hook refused the operation
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl FormError {
    pub fn bind(property: &str, source: BindError) -> Self {
        FormError::Bind {
            property: property.to_string(),
            source,
        }
    }
}
