// File: src/field.rs
// Purpose: Form field factory (field kinds, rendering, input binding)

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{FieldsConfig, FormsConfig};
use crate::descriptor::{PropertyDescriptor, SemanticType};
use crate::error::BindError;
use model_forms_types::{CaseSet, FieldValue};
use model_forms_validation::ValidationResult;

/// Abstract editing widget category for a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFieldKind {
    Text,
    Number,
    Toggle,
    DatePicker,
    EnumPicker,
    RelationshipPicker,
}

impl FormFieldKind {
    /// Kind for a semantic type, after removing `Optional` layers
    pub fn for_type(semantic_type: &SemanticType) -> Self {
        match semantic_type.unwrapped() {
            SemanticType::String | SemanticType::Unknown => FormFieldKind::Text,
            SemanticType::Integer | SemanticType::Real => FormFieldKind::Number,
            SemanticType::Boolean => FormFieldKind::Toggle,
            SemanticType::Timestamp => FormFieldKind::DatePicker,
            SemanticType::Enumeration(_) => FormFieldKind::EnumPicker,
            SemanticType::Relationship => FormFieldKind::RelationshipPicker,
            // unwrapped() never returns Optional
            SemanticType::Optional(_) => FormFieldKind::Text,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormFieldKind::Text => "text",
            FormFieldKind::Number => "number",
            FormFieldKind::Toggle => "toggle",
            FormFieldKind::DatePicker => "date picker",
            FormFieldKind::EnumPicker => "enum picker",
            FormFieldKind::RelationshipPicker => "relationship picker",
        }
    }
}

impl fmt::Display for FormFieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Field kind of a descriptor; depends on nothing but its semantic type
pub fn field_kind(descriptor: &PropertyDescriptor) -> FormFieldKind {
    FormFieldKind::for_type(descriptor.semantic_type())
}

/// Widget payload of a rendered field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum FieldWidget {
    Text {
        text: String,
    },
    Number {
        text: String,
        step: f64,
    },
    Toggle {
        on: bool,
    },
    DatePicker {
        value: Option<DateTime<Utc>>,
    },
    EnumPicker {
        case_set: String,
        options: Vec<String>,
        selected: Option<String>,
    },
    /// Placeholder for an enumeration nobody registered cases for
    Unsupported {
        message: String,
    },
    RelationshipPicker {
        selected: Option<String>,
        prompt: String,
    },
}

/// Everything a view needs to draw one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub kind: FormFieldKind,
    pub widget: FieldWidget,
    pub editable: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Increment,
    Decrement,
}

/// A user edit, before it is bound to a store value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    /// Raw numeric text as typed
    Number(String),
    Step(StepDirection),
    Toggle(bool),
    Date(DateTime<Utc>),
    /// Case name of an enumeration
    Case(String),
    Relationship(Option<String>),
    Clear,
}

impl FieldInput {
    fn name(&self) -> &'static str {
        match self {
            FieldInput::Text(_) => "text",
            FieldInput::Number(_) => "number",
            FieldInput::Step(_) => "step",
            FieldInput::Toggle(_) => "toggle",
            FieldInput::Date(_) => "date",
            FieldInput::Case(_) => "case",
            FieldInput::Relationship(_) => "relationship",
            FieldInput::Clear => "clear",
        }
    }
}

/// Case names per case set, for enum pickers
#[derive(Debug, Clone, Default)]
pub struct EnumCatalog {
    sets: BTreeMap<String, Vec<String>>,
}

impl EnumCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<E: CaseSet>(&mut self) -> &mut Self {
        let cases = E::cases().iter().map(|c| c.to_string()).collect();
        self.register_cases(E::case_set_name(), cases)
    }

    pub fn register_cases(&mut self, case_set: impl Into<String>, cases: Vec<String>) -> &mut Self {
        self.sets.insert(case_set.into(), cases);
        self
    }

    pub fn cases(&self, case_set: &str) -> Option<&[String]> {
        self.sets.get(case_set).map(Vec::as_slice)
    }
}

/// Renders descriptors into fields and binds user input to store values
#[derive(Debug, Clone, Default)]
pub struct FormFieldFactory {
    catalog: EnumCatalog,
    steps: FieldsConfig,
}

impl FormFieldFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &FormsConfig) -> Self {
        Self {
            catalog: EnumCatalog::default(),
            steps: config.fields.clone(),
        }
    }

    pub fn with_catalog(mut self, catalog: EnumCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Register the cases of `E` so its fields render as pickers
    pub fn register<E: CaseSet>(&mut self) -> &mut Self {
        self.catalog.register::<E>();
        self
    }

    pub fn catalog(&self) -> &EnumCatalog {
        &self.catalog
    }

    pub fn field_kind(&self, descriptor: &PropertyDescriptor) -> FormFieldKind {
        field_kind(descriptor)
    }

    pub fn validate(&self, descriptor: &PropertyDescriptor, value: Option<&FieldValue>) -> ValidationResult {
        descriptor.validate(value)
    }

    pub fn render(
        &self,
        descriptor: &PropertyDescriptor,
        value: Option<&FieldValue>,
        editable: bool,
        error: Option<&str>,
    ) -> RenderedField {
        let kind = field_kind(descriptor);
        let text = || value.map(ToString::to_string).unwrap_or_default();

        let widget = match (kind, descriptor.semantic_type().unwrapped()) {
            (FormFieldKind::Number, semantic_type) => FieldWidget::Number {
                text: text(),
                step: self.step_for(semantic_type),
            },
            (FormFieldKind::Toggle, _) => FieldWidget::Toggle {
                on: value.and_then(FieldValue::as_bool).unwrap_or(false),
            },
            (FormFieldKind::DatePicker, _) => FieldWidget::DatePicker {
                value: value.and_then(FieldValue::as_timestamp),
            },
            (FormFieldKind::EnumPicker, SemanticType::Enumeration(case_set)) => {
                match self.catalog.cases(case_set) {
                    Some(cases) => FieldWidget::EnumPicker {
                        case_set: case_set.clone(),
                        options: cases.to_vec(),
                        selected: match value {
                            Some(FieldValue::Enumeration(case)) => Some(case.clone()),
                            _ => None,
                        },
                    },
                    None => {
                        tracing::warn!(
                            property = descriptor.name(),
                            case_set = %case_set,
                            "No cases registered, rendering placeholder"
                        );
                        FieldWidget::Unsupported {
                            message: format!("Unsupported picker: {}", case_set),
                        }
                    }
                }
            }
            (FormFieldKind::RelationshipPicker, _) => FieldWidget::RelationshipPicker {
                selected: match value {
                    Some(FieldValue::Relationship(id)) => Some(id.clone()),
                    _ => None,
                },
                prompt: format!("Select {}", descriptor.display_name()),
            },
            _ => FieldWidget::Text { text: text() },
        };

        RenderedField {
            name: descriptor.name().to_string(),
            label: descriptor.display_name().to_string(),
            required: descriptor.is_required(),
            kind,
            widget,
            editable,
            error: error.map(str::to_string),
        }
    }

    /// New store value for `input` applied to a field currently holding `current`
    pub fn bind(
        &self,
        descriptor: &PropertyDescriptor,
        current: Option<&FieldValue>,
        input: FieldInput,
    ) -> Result<Option<FieldValue>, BindError> {
        let kind = field_kind(descriptor);
        let semantic_type = descriptor.semantic_type().unwrapped();

        let bound = match (kind, input) {
            (_, FieldInput::Clear) => None,

            (FormFieldKind::Text, FieldInput::Text(text)) => {
                if text.is_empty() {
                    None
                } else {
                    Some(FieldValue::String(text))
                }
            }

            (FormFieldKind::Number, FieldInput::Number(text)) => parse_number(semantic_type, &text),
            (FormFieldKind::Number, FieldInput::Step(direction)) => {
                Some(self.step(semantic_type, current, direction)?)
            }

            (FormFieldKind::Toggle, FieldInput::Toggle(on)) => Some(FieldValue::Boolean(on)),
            (FormFieldKind::DatePicker, FieldInput::Date(ts)) => Some(FieldValue::Timestamp(ts)),

            (FormFieldKind::EnumPicker, FieldInput::Case(case)) => {
                if let SemanticType::Enumeration(case_set) = semantic_type {
                    if let Some(cases) = self.catalog.cases(case_set) {
                        if !cases.contains(&case) {
                            return Err(BindError::UnknownCase {
                                case_set: case_set.clone(),
                                case,
                            });
                        }
                    }
                }
                Some(FieldValue::Enumeration(case))
            }

            (FormFieldKind::RelationshipPicker, FieldInput::Relationship(id)) => {
                id.filter(|id| !id.is_empty()).map(FieldValue::Relationship)
            }

            (kind, input) => {
                return Err(BindError::KindMismatch {
                    input: input.name(),
                    field: kind.name(),
                })
            }
        };

        tracing::debug!(property = descriptor.name(), value = ?bound, "Bound field input");
        Ok(bound)
    }

    fn step_for(&self, semantic_type: &SemanticType) -> f64 {
        match semantic_type {
            SemanticType::Integer => self.steps.integer_step as f64,
            _ => self.steps.real_step,
        }
    }

    fn step(
        &self,
        semantic_type: &SemanticType,
        current: Option<&FieldValue>,
        direction: StepDirection,
    ) -> Result<FieldValue, BindError> {
        let sign: i64 = match direction {
            StepDirection::Increment => 1,
            StepDirection::Decrement => -1,
        };

        match semantic_type {
            SemanticType::Integer => {
                let value = match current {
                    None => 0,
                    Some(FieldValue::Integer(i)) => *i,
                    Some(_) => return Err(BindError::NotNumeric),
                };
                Ok(FieldValue::Integer(
                    value.saturating_add(sign * self.steps.integer_step),
                ))
            }
            _ => {
                let value = match current {
                    None => 0.0,
                    Some(v) => v.as_f64().ok_or(BindError::NotNumeric)?,
                };
                Ok(FieldValue::Real(round_to_step(
                    value + sign as f64 * self.steps.real_step,
                    self.steps.real_step,
                )))
            }
        }
    }
}

/// Empty or unparsable text is absent
fn parse_number(semantic_type: &SemanticType, text: &str) -> Option<FieldValue> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    match semantic_type {
        SemanticType::Integer => text.parse::<i64>().ok().map(FieldValue::Integer),
        _ => text
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .map(FieldValue::Real),
    }
}

/// Drop the float noise repeated stepping accumulates (0.1 + 0.2)
fn round_to_step(value: f64, step: f64) -> f64 {
    let decimals = step_decimals(step);
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn step_decimals(step: f64) -> i32 {
    let mut decimals = 0;
    let mut scaled = step.abs();
    while decimals < 9 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::PropertyAnalyzer;
    use model_forms_types::{DeclaredType, RawProperty, TypeFacts};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn describe(name: &str, declared: DeclaredType) -> PropertyDescriptor {
        PropertyAnalyzer::new()
            .analyze_properties(vec![RawProperty::new(name, declared)])
            .remove(0)
    }

    fn plain(type_name: &str) -> DeclaredType {
        DeclaredType::plain(TypeFacts::named(type_name))
    }

    fn kind_set() -> DeclaredType {
        DeclaredType::plain(TypeFacts::case_set("WorkoutKind", "WorkoutKind"))
    }

    #[rstest]
    #[case(SemanticType::String, FormFieldKind::Text)]
    #[case(SemanticType::Unknown, FormFieldKind::Text)]
    #[case(SemanticType::Integer, FormFieldKind::Number)]
    #[case(SemanticType::Real, FormFieldKind::Number)]
    #[case(SemanticType::Boolean, FormFieldKind::Toggle)]
    #[case(SemanticType::Timestamp, FormFieldKind::DatePicker)]
    #[case(SemanticType::Enumeration("Kind".into()), FormFieldKind::EnumPicker)]
    #[case(SemanticType::Relationship, FormFieldKind::RelationshipPicker)]
    #[case(SemanticType::optional(SemanticType::optional(SemanticType::Boolean)), FormFieldKind::Toggle)]
    fn test_kind_for_type(#[case] semantic_type: SemanticType, #[case] expected: FormFieldKind) {
        assert_eq!(FormFieldKind::for_type(&semantic_type), expected);
    }

    #[test]
    fn test_kind_ignores_name_and_requiredness() {
        let required = describe("title", plain("String"));
        let optional = describe("notes", DeclaredType::optional(plain("String")));
        assert_ne!(required.is_required(), optional.is_required());
        assert_eq!(field_kind(&required), field_kind(&optional));
    }

    #[test]
    fn test_empty_text_binds_absent() {
        let factory = FormFieldFactory::new();
        let title = describe("title", plain("String"));

        let bound = factory.bind(&title, None, FieldInput::Text(String::new())).unwrap();
        assert_eq!(bound, None);
        assert_eq!(
            factory.validate(&title, bound.as_ref()).message(),
            Some("This field is required")
        );

        let bound = factory.bind(&title, None, FieldInput::Text("Leg day".into())).unwrap();
        assert_eq!(bound, Some(FieldValue::from("Leg day")));
    }

    #[rstest]
    #[case("f64", "0", Some(FieldValue::Real(0.0)))]
    #[case("f64", " 72.5 ", Some(FieldValue::Real(72.5)))]
    #[case("f64", "", None)]
    #[case("f64", "abc", None)]
    #[case("f64", "inf", None)]
    #[case("i32", "12", Some(FieldValue::Integer(12)))]
    #[case("i32", "1.5", None)]
    fn test_number_text(#[case] type_name: &str, #[case] text: &str, #[case] expected: Option<FieldValue>) {
        let factory = FormFieldFactory::new();
        let descriptor = describe("weightKg", plain(type_name));
        assert_eq!(
            factory.bind(&descriptor, None, FieldInput::Number(text.into())).unwrap(),
            expected
        );
    }

    #[test]
    fn test_stepping() {
        let factory = FormFieldFactory::new();
        let reps = describe("reps", plain("i32"));
        let weight = describe("weightKg", plain("f64"));

        assert_eq!(
            factory.bind(&reps, None, FieldInput::Step(StepDirection::Increment)).unwrap(),
            Some(FieldValue::Integer(1))
        );
        assert_eq!(
            factory
                .bind(&reps, Some(&FieldValue::Integer(5)), FieldInput::Step(StepDirection::Decrement))
                .unwrap(),
            Some(FieldValue::Integer(4))
        );

        let mut value = Some(FieldValue::Real(0.2));
        value = factory
            .bind(&weight, value.as_ref(), FieldInput::Step(StepDirection::Increment))
            .unwrap();
        assert_eq!(value, Some(FieldValue::Real(0.3)));

        assert_eq!(
            factory.bind(&weight, Some(&FieldValue::from("x")), FieldInput::Step(StepDirection::Increment)),
            Err(BindError::NotNumeric)
        );
    }

    #[test]
    fn test_kind_mismatch() {
        let factory = FormFieldFactory::new();
        let done = describe("completed", plain("bool"));
        assert_eq!(
            factory.bind(&done, None, FieldInput::Text("yes".into())),
            Err(BindError::KindMismatch {
                input: "text",
                field: "toggle"
            })
        );
        assert_eq!(factory.bind(&done, None, FieldInput::Clear), Ok(None));
    }

    #[test]
    fn test_enum_picker_and_placeholder() {
        let kind = describe("kind", kind_set());

        let unregistered = FormFieldFactory::new();
        let field = unregistered.render(&kind, None, true, None);
        assert_eq!(field.kind, FormFieldKind::EnumPicker);
        assert_eq!(
            field.widget,
            FieldWidget::Unsupported {
                message: "Unsupported picker: WorkoutKind".into()
            }
        );

        let mut catalog = EnumCatalog::new();
        catalog.register_cases("WorkoutKind", vec!["Run".into(), "Lift".into()]);
        let factory = FormFieldFactory::new().with_catalog(catalog);

        let field = factory.render(&kind, Some(&FieldValue::Enumeration("Lift".into())), true, None);
        assert_eq!(
            field.widget,
            FieldWidget::EnumPicker {
                case_set: "WorkoutKind".into(),
                options: vec!["Run".into(), "Lift".into()],
                selected: Some("Lift".into()),
            }
        );
        assert_eq!(
            factory.bind(&kind, None, FieldInput::Case("Swim".into())),
            Err(BindError::UnknownCase {
                case_set: "WorkoutKind".into(),
                case: "Swim".into()
            })
        );
    }

    #[test]
    fn test_render_number_field() {
        let factory = FormFieldFactory::new();
        let weight = describe("weightKg", plain("f64"));
        let field = factory.render(&weight, Some(&FieldValue::Real(72.5)), false, Some("too heavy"));

        assert_eq!(
            field,
            RenderedField {
                name: "weightKg".into(),
                label: "Weight Kg".into(),
                required: false,
                kind: FormFieldKind::Number,
                widget: FieldWidget::Number {
                    text: "72.5".into(),
                    step: 0.1
                },
                editable: false,
                error: Some("too heavy".into()),
            }
        );
    }

    #[test]
    fn test_relationship_binding() {
        let factory = FormFieldFactory::new();
        let coach = describe(
            "coach",
            DeclaredType::optional(DeclaredType::plain(TypeFacts::entity_reference("RelatedId"))),
        );

        assert_eq!(
            factory.bind(&coach, None, FieldInput::Relationship(Some("c-1".into()))),
            Ok(Some(FieldValue::Relationship("c-1".into())))
        );
        assert_eq!(
            factory.bind(&coach, None, FieldInput::Relationship(Some(String::new()))),
            Ok(None)
        );

        let field = factory.render(&coach, None, true, None);
        assert_eq!(
            field.widget,
            FieldWidget::RelationshipPicker {
                selected: None,
                prompt: "Select Coach".into()
            }
        );
    }
}
