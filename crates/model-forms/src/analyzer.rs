// File: src/analyzer.rs
// Purpose: Property analysis (type facts -> descriptors with rules)

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{AnalyzerConfig, FormsConfig, RulesConfig};
use crate::descriptor::{PropertyDescriptor, SemanticType};
use model_forms_types::{DeclaredType, Model, RawProperty, TypeFacts};
use model_forms_validation::{distant_future, distant_past, ValidationRule};

static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

const STRING_TYPES: &[&str] = &["String", "str"];

const INTEGER_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize",
];

const REAL_TYPES: &[&str] = &["f32", "f64"];

const TIMESTAMP_TYPES: &[&str] = &["DateTime", "NaiveDateTime"];

/// Turns a model's raw property facts into sorted [`PropertyDescriptor`]s
#[derive(Debug, Clone, Default)]
pub struct PropertyAnalyzer {
    analyzer: AnalyzerConfig,
    rules: RulesConfig,
}

impl PropertyAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &FormsConfig) -> Self {
        Self {
            analyzer: config.analyzer.clone(),
            rules: config.rules.clone(),
        }
    }

    /// Descriptors for every stored property of `M`, sorted by name
    pub fn analyze<M: Model>(&self) -> Vec<PropertyDescriptor> {
        let descriptors = self.analyze_properties(M::properties());
        tracing::debug!(
            model = M::model_name(),
            properties = descriptors.len(),
            "Analyzed model"
        );
        descriptors
    }

    pub fn analyze_properties(&self, properties: Vec<RawProperty>) -> Vec<PropertyDescriptor> {
        let mut descriptors: Vec<PropertyDescriptor> = properties
            .into_iter()
            .map(|property| self.describe(property))
            .collect();
        descriptors.sort_by(|a, b| a.name().cmp(b.name()));
        descriptors
    }

    fn describe(&self, property: RawProperty) -> PropertyDescriptor {
        let semantic_type = classify_declared(&property.declared);
        let facts = property.declared.facts();
        if *semantic_type.unwrapped() == SemanticType::Unknown && !facts.text {
            tracing::warn!(
                property = %property.name,
                type_name = %facts.type_name,
                "Unclassified property type, falling back to text entry"
            );
        }

        let is_required = self.is_required(&property.name);
        let rules = self.rules_for(&semantic_type, is_required);

        PropertyDescriptor::new(
            display_name(&property.name),
            property.name,
            semantic_type,
            property.declared.is_optional(),
            is_required,
            rules,
        )
    }

    /// Canonical-name membership, ignoring case
    pub fn is_required(&self, name: &str) -> bool {
        self.analyzer
            .required_fields
            .iter()
            .any(|required| required.eq_ignore_ascii_case(name))
    }

    /// Derived rule set: `Required` first when required, then the type's rules
    pub fn rules_for(&self, semantic_type: &SemanticType, is_required: bool) -> Vec<ValidationRule> {
        let mut rules = Vec::new();
        if is_required {
            rules.push(ValidationRule::Required);
        }

        match semantic_type.unwrapped() {
            SemanticType::String => {
                rules.push(ValidationRule::MinLength(self.rules.string_min_length));
                rules.push(ValidationRule::MaxLength(self.rules.string_max_length));
            }
            SemanticType::Integer => {
                let bound = self.rules.integer_bound;
                rules.push(ValidationRule::numeric_range(-bound, bound));
            }
            SemanticType::Real => {
                let bound = self.rules.real_bound;
                rules.push(ValidationRule::numeric_range(-bound, bound));
            }
            SemanticType::Timestamp => {
                rules.push(ValidationRule::date_range(distant_past(), distant_future()));
            }
            _ => {}
        }

        rules
    }
}

/// Semantic type of a declared type, keeping `Optional` layers
pub fn classify_declared(declared: &DeclaredType) -> SemanticType {
    match declared {
        DeclaredType::Optional(inner) => SemanticType::optional(classify_declared(inner)),
        DeclaredType::Plain(facts) => classify(facts),
    }
}

/// Classify unwrapped type facts in precedence order
///
/// Text-stored fields are always `Unknown`: their values are strings no matter
/// what the type name looks like.
pub fn classify(facts: &TypeFacts) -> SemanticType {
    if facts.text {
        return SemanticType::Unknown;
    }

    let base = facts.base_name();
    let base = base.as_str();

    if STRING_TYPES.contains(&base) {
        SemanticType::String
    } else if INTEGER_TYPES.contains(&base) {
        SemanticType::Integer
    } else if REAL_TYPES.contains(&base) {
        SemanticType::Real
    } else if base == "bool" {
        SemanticType::Boolean
    } else if TIMESTAMP_TYPES.contains(&base) {
        SemanticType::Timestamp
    } else if let Some(case_set) = &facts.case_set {
        SemanticType::Enumeration(case_set.clone())
    } else if facts.entity_reference {
        SemanticType::Relationship
    } else {
        SemanticType::Unknown
    }
}

/// `startWeightKg` and `start_weight_kg` both become `Start Weight Kg`
pub fn display_name(name: &str) -> String {
    let spaced = CAMEL_BOUNDARY.replace_all(name, "$1 $2").replace('_', " ");
    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
