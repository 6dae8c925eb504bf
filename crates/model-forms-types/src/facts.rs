// File: model-forms-types/src/facts.rs
// Purpose: Raw type facts a model reports about its stored properties

use serde::{Deserialize, Serialize};

/// What a field type says about itself, before any classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeFacts {
    /// Type name as written in the model (`String`, `f64`, `DateTime<Utc>`, ...)
    pub type_name: String,

    /// Name of the closed case set, for fieldless enums
    #[serde(default)]
    pub case_set: Option<String>,

    /// The value points at another entity
    #[serde(default)]
    pub entity_reference: bool,

    /// Stored as text through `Display`/`FromStr`, whatever the type name says
    #[serde(default)]
    pub text: bool,
}

impl TypeFacts {
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            case_set: None,
            entity_reference: false,
            text: false,
        }
    }

    /// Facts for a `#[model(text)]` field
    pub fn text(type_name: impl Into<String>) -> Self {
        Self {
            text: true,
            ..Self::named(type_name)
        }
    }

    pub fn case_set(type_name: impl Into<String>, case_set: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            case_set: Some(case_set.into()),
            entity_reference: false,
            text: false,
        }
    }

    pub fn entity_reference(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            case_set: None,
            entity_reference: true,
            text: false,
        }
    }

    /// Type name with module path, generic arguments and whitespace removed.
    ///
    /// `chrono::DateTime<chrono::Utc>` becomes `DateTime`, `&'static str` becomes `str`.
    pub fn base_name(&self) -> String {
        let without_generics = match self.type_name.find('<') {
            Some(idx) => &self.type_name[..idx],
            None => self.type_name.as_str(),
        };

        let last_segment = without_generics
            .rsplit("::")
            .next()
            .unwrap_or(without_generics);

        last_segment
            .trim()
            .trim_start_matches('&')
            .trim_start_matches("'static")
            .trim()
            .to_string()
    }
}

/// Declared type of a property: either a plain type or an optional wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclaredType {
    Optional(Box<DeclaredType>),
    Plain(TypeFacts),
}

impl DeclaredType {
    pub fn plain(facts: TypeFacts) -> Self {
        DeclaredType::Plain(facts)
    }

    pub fn optional(inner: DeclaredType) -> Self {
        DeclaredType::Optional(Box::new(inner))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, DeclaredType::Optional(_))
    }

    /// Facts of the innermost wrapped type
    pub fn facts(&self) -> &TypeFacts {
        match self {
            DeclaredType::Optional(inner) => inner.facts(),
            DeclaredType::Plain(facts) => facts,
        }
    }
}

/// One stored property as reported by [`crate::Model::properties`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProperty {
    pub name: String,
    pub declared: DeclaredType,
}

impl RawProperty {
    pub fn new(name: impl Into<String>, declared: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared,
        }
    }
}
