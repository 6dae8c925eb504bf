// File: src/descriptor.rs
// Purpose: Semantic types and the per-property descriptor

use serde::{Deserialize, Serialize};
use std::fmt;

use model_forms_validation::{validate_all, ValidationResult, ValidationRule};
use model_forms_types::FieldValue;

/// The engine's classification of a property's value domain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    String,
    Integer,
    Real,
    Boolean,
    Timestamp,
    /// Closed case set, by name
    Enumeration(String),
    Relationship,
    Optional(Box<SemanticType>),
    Unknown,
}

impl SemanticType {
    pub fn optional(inner: SemanticType) -> Self {
        SemanticType::Optional(Box::new(inner))
    }

    /// Innermost type with every `Optional` layer removed
    pub fn unwrapped(&self) -> &SemanticType {
        match self {
            SemanticType::Optional(inner) => inner.unwrapped(),
            other => other,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.unwrapped(), SemanticType::Integer | SemanticType::Real)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::String => write!(f, "String"),
            SemanticType::Integer => write!(f, "Integer"),
            SemanticType::Real => write!(f, "Real"),
            SemanticType::Boolean => write!(f, "Boolean"),
            SemanticType::Timestamp => write!(f, "Timestamp"),
            SemanticType::Enumeration(name) => write!(f, "Enumeration({})", name),
            SemanticType::Relationship => write!(f, "Relationship"),
            SemanticType::Optional(inner) => write!(f, "Optional({})", inner),
            SemanticType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Metadata for one property of a model type.
///
/// Produced by [`crate::PropertyAnalyzer`] and never mutated afterwards;
/// [`PropertyDescriptor::with_rule`] returns a new descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    name: String,
    semantic_type: SemanticType,
    display_name: String,
    is_optional: bool,
    is_required: bool,
    rules: Vec<ValidationRule>,
}

impl PropertyDescriptor {
    pub(crate) fn new(
        display_name: String,
        name: String,
        semantic_type: SemanticType,
        is_optional: bool,
        is_required: bool,
        rules: Vec<ValidationRule>,
    ) -> Self {
        Self {
            name,
            semantic_type,
            display_name,
            is_optional,
            is_required,
            rules,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn semantic_type(&self) -> &SemanticType {
        &self.semantic_type
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    /// Copy of this descriptor with `rule` run after the existing ones
    pub fn with_rule(&self, rule: ValidationRule) -> Self {
        let mut next = self.clone();
        next.rules.push(rule);
        next
    }

    /// First failing rule against `value`
    pub fn validate(&self, value: Option<&FieldValue>) -> ValidationResult {
        validate_all(&self.rules, value)
    }
}
