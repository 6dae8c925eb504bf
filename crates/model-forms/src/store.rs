// File: src/store.rs
// Purpose: Field-value store, validation error map and create-mode defaults

use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::descriptor::{PropertyDescriptor, SemanticType};
use model_forms_types::{FieldValue, Model};

/// Property name -> first failing rule's message
pub type ValidationErrorMap = BTreeMap<String, String>;

/// In-progress edits for one form session, keyed by property name.
///
/// An entry holding `None` is an absent value; a missing entry is a property
/// the store was never populated with.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldValueStore {
    values: BTreeMap<String, Option<FieldValue>>,
}

impl FieldValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an existing entity's current values
    pub fn from_entity<M: Model>(entity: &M, descriptors: &[PropertyDescriptor]) -> Self {
        let values = descriptors
            .iter()
            .map(|d| (d.name().to_string(), entity.get(d.name())))
            .collect();
        Self { values }
    }

    /// Seed with per-type defaults
    pub fn with_defaults(descriptors: &[PropertyDescriptor]) -> Self {
        let values = descriptors
            .iter()
            .map(|d| (d.name().to_string(), default_value(d.semantic_type())))
            .collect();
        Self { values }
    }

    /// Current value; `None` for absent and for unknown names
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name).and_then(Option::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Option<FieldValue>) {
        self.values.insert(name.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// JSON snapshot of the store, absent values as `null`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Create-mode default for a semantic type
pub fn default_value(semantic_type: &SemanticType) -> Option<FieldValue> {
    match semantic_type {
        SemanticType::String => Some(FieldValue::String(String::new())),
        SemanticType::Integer => Some(FieldValue::Integer(0)),
        SemanticType::Real => Some(FieldValue::Real(0.0)),
        SemanticType::Boolean => Some(FieldValue::Boolean(false)),
        SemanticType::Timestamp => Some(FieldValue::Timestamp(Utc::now())),
        SemanticType::Optional(_)
        | SemanticType::Enumeration(_)
        | SemanticType::Relationship
        | SemanticType::Unknown => None,
    }
}
