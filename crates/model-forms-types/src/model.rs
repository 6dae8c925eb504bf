// File: model-forms-types/src/model.rs
// Purpose: Model trait definition (compile-time schema registration)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::codec::{CodecError, FieldCodec};
use crate::facts::{DeclaredType, RawProperty, TypeFacts};
use crate::value::FieldValue;

/// Trait for entity types that can be edited through a dynamic form
///
/// This is automatically implemented by the #[derive(Model)] macro
pub trait Model: Sized {
    /// Name of the model type, e.g. `WorkoutRecord`
    fn model_name() -> &'static str;

    /// Stored properties in declaration order
    fn properties() -> Vec<RawProperty>;

    /// Current value of a property, `None` when absent or unknown
    fn get(&self, name: &str) -> Option<FieldValue>;

    /// Assign one property from a store entry
    fn set(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), AssignError>;
}

/// Failure assigning a store entry back onto a model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignError {
    #[error("{model} has no property named '{property}'")]
    UnknownProperty { model: &'static str, property: String },

    #[error("cannot assign {model}.{property}: {source}")]
    Codec {
        model: &'static str,
        property: String,
        #[source]
        source: CodecError,
    },
}

impl AssignError {
    pub fn codec(model: &'static str, property: &str, source: CodecError) -> Self {
        AssignError::Codec {
            model,
            property: property.to_string(),
            source,
        }
    }
}

/// A closed, enumerable set of cases
///
/// This is automatically implemented by the #[derive(Enumeration)] macro
pub trait CaseSet {
    fn case_set_name() -> &'static str;

    /// Every case name, in declaration order
    fn cases() -> &'static [&'static str];

    fn case_name(&self) -> &'static str;

    fn from_case_name(name: &str) -> Option<Self>
    where
        Self: Sized;
}

/// Opaque reference to another entity, stored by identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelatedId(pub String);

impl RelatedId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelatedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FieldCodec for RelatedId {
    fn declared_type() -> DeclaredType {
        DeclaredType::plain(TypeFacts::entity_reference("RelatedId"))
    }

    fn encode(&self) -> Option<FieldValue> {
        Some(FieldValue::Relationship(self.0.clone()))
    }

    fn decode(value: Option<FieldValue>) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Relationship(id)) => Ok(RelatedId(id)),
            Some(other) => Err(CodecError::Mismatch {
                expected: "relationship",
                found: other.kind(),
            }),
            None => Err(CodecError::Missing),
        }
    }
}

/// Encode a [`CaseSet`] value; used by the generated `FieldCodec` impl
pub fn encode_case<E: CaseSet>(value: &E) -> Option<FieldValue> {
    Some(FieldValue::Enumeration(value.case_name().to_string()))
}

/// Decode a [`CaseSet`] value; used by the generated `FieldCodec` impl
pub fn decode_case<E: CaseSet>(value: Option<FieldValue>) -> Result<E, CodecError> {
    match value {
        Some(FieldValue::Enumeration(case)) => {
            E::from_case_name(&case).ok_or_else(|| CodecError::UnknownCase {
                case_set: E::case_set_name().to_string(),
                case,
            })
        }
        Some(other) => Err(CodecError::Mismatch {
            expected: "enumeration",
            found: other.kind(),
        }),
        None => Err(CodecError::Missing),
    }
}
