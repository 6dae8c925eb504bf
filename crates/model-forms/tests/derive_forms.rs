/// Schema registration through the derive macros, analyzed end to end
///
/// Covers classification of every supported field type, descriptor ordering,
/// field kinds, and the canonical-name requiredness rule.
mod common;

use common::{leg_day, Kind, Tempo, WorkoutRecord};
use model_forms::types::{AssignError, CodecError};
use model_forms::{
    field_kind, CaseSet, FieldInput, FieldValue, FormFieldFactory, FormFieldKind, FormsConfig,
    Model, PropertyAnalyzer, SemanticType, ValidationRule,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_derived_properties_skip_marked_fields() {
    let names: Vec<String> = WorkoutRecord::properties()
        .into_iter()
        .map(|p| p.name)
        .collect();

    assert_eq!(
        names,
        vec!["id", "title", "date", "reps", "weight_kg", "completed", "kind", "coach", "tempo"]
    );
    assert_eq!(WorkoutRecord::model_name(), "WorkoutRecord");
}

#[test]
fn test_descriptors_sorted_by_name() {
    let descriptors = PropertyAnalyzer::new().analyze::<WorkoutRecord>();
    let names: Vec<&str> = descriptors.iter().map(|d| d.name()).collect();
    assert_eq!(
        names,
        vec!["coach", "completed", "date", "id", "kind", "reps", "tempo", "title", "weight_kg"]
    );
}

#[rstest]
#[case("id", SemanticType::String, FormFieldKind::Text)]
#[case("title", SemanticType::String, FormFieldKind::Text)]
#[case("date", SemanticType::Timestamp, FormFieldKind::DatePicker)]
#[case("reps", SemanticType::Integer, FormFieldKind::Number)]
#[case("weight_kg", SemanticType::optional(SemanticType::Real), FormFieldKind::Number)]
#[case("completed", SemanticType::Boolean, FormFieldKind::Toggle)]
#[case("kind", SemanticType::Enumeration("WorkoutKind".into()), FormFieldKind::EnumPicker)]
#[case("coach", SemanticType::optional(SemanticType::Relationship), FormFieldKind::RelationshipPicker)]
#[case("tempo", SemanticType::Unknown, FormFieldKind::Text)]
fn test_classification(
    #[case] name: &str,
    #[case] semantic_type: SemanticType,
    #[case] kind: FormFieldKind,
) {
    let descriptors = PropertyAnalyzer::new().analyze::<WorkoutRecord>();
    let descriptor = descriptors.iter().find(|d| d.name() == name).unwrap();

    assert_eq!(descriptor.semantic_type(), &semantic_type);
    assert_eq!(field_kind(descriptor), kind);
}

#[test]
fn test_requiredness_and_labels() {
    let descriptors = PropertyAnalyzer::new().analyze::<WorkoutRecord>();
    let required: Vec<&str> = descriptors
        .iter()
        .filter(|d| d.is_required())
        .map(|d| d.name())
        .collect();
    assert_eq!(required, vec!["date", "id", "title"]);

    let weight = descriptors.iter().find(|d| d.name() == "weight_kg").unwrap();
    assert_eq!(weight.display_name(), "Weight Kg");
    assert!(weight.is_optional());
    assert_eq!(
        weight.rules(),
        &[ValidationRule::numeric_range(-999_999.99, 999_999.99)]
    );
}

#[test]
fn test_analysis_is_idempotent() {
    let analyzer = PropertyAnalyzer::new();
    assert_eq!(
        analyzer.analyze::<WorkoutRecord>(),
        analyzer.analyze::<WorkoutRecord>()
    );
}

#[test]
fn test_enumeration_derive() {
    assert_eq!(Kind::case_set_name(), "WorkoutKind");
    assert_eq!(Kind::cases(), &["Run", "Lift", "Swim"]);
    assert_eq!(Kind::Swim.case_name(), "Swim");
    assert_eq!(Kind::from_case_name("Lift"), Some(Kind::Lift));
    assert_eq!(Kind::from_case_name("Row"), None);
}

#[test]
fn test_get_and_set_through_derive() {
    let mut record = leg_day();
    assert_eq!(record.get("reps"), Some(FieldValue::Integer(8)));
    assert_eq!(record.get("tempo"), Some(FieldValue::from("3-1")));
    assert_eq!(record.get("kind"), Some(FieldValue::Enumeration("Lift".into())));
    assert_eq!(record.get("coach"), Some(FieldValue::Relationship("coach-7".into())));
    assert_eq!(record.get("cached_volume"), None);

    record.set("tempo", Some(FieldValue::from("4-0"))).unwrap();
    assert_eq!(record.tempo, Tempo { down: 4, up: 0 });

    record.set("weight_kg", None).unwrap();
    assert_eq!(record.weight_kg, None);

    record.set("kind", Some(FieldValue::Enumeration("Swim".into()))).unwrap();
    assert_eq!(record.kind, Kind::Swim);
}

#[test]
fn test_set_errors() {
    let mut record = leg_day();

    assert_eq!(
        record.set("cached_volume", Some(FieldValue::Real(1.0))),
        Err(AssignError::UnknownProperty {
            model: "WorkoutRecord",
            property: "cached_volume".into(),
        })
    );

    let err = record.set("reps", Some(FieldValue::from("eight"))).unwrap_err();
    assert!(matches!(
        err,
        AssignError::Codec {
            source: CodecError::Mismatch { expected: "integer", found: "string" },
            ..
        }
    ));

    let err = record.set("title", None).unwrap_err();
    assert!(matches!(err, AssignError::Codec { source: CodecError::Missing, .. }));

    let err = record.set("tempo", Some(FieldValue::from("fast"))).unwrap_err();
    assert!(matches!(err, AssignError::Codec { source: CodecError::Parse { .. }, .. }));
}

// Scenario: a required real field. Zero is a present value; empty text is absent.
#[test]
fn test_required_real_accepts_zero_rejects_empty() {
    let config = FormsConfig::from_toml_str(
        r#"
        [analyzer]
        required_fields = ["weight_kg"]
        "#,
    )
    .unwrap();
    let descriptors = PropertyAnalyzer::with_config(&config).analyze::<WorkoutRecord>();
    let weight = descriptors.iter().find(|d| d.name() == "weight_kg").unwrap();
    assert!(weight.is_required());

    let factory = FormFieldFactory::new();

    let zero = factory.bind(weight, None, FieldInput::Number("0".into())).unwrap();
    assert_eq!(zero, Some(FieldValue::Real(0.0)));
    assert!(factory.validate(weight, zero.as_ref()).is_valid());

    let empty = factory.bind(weight, zero.as_ref(), FieldInput::Number(String::new())).unwrap();
    assert_eq!(empty, None);
    assert_eq!(
        factory.validate(weight, empty.as_ref()).message(),
        Some("This field is required")
    );
}

#[test]
fn test_field_kind_depends_only_on_semantic_type() {
    let default_descriptors = PropertyAnalyzer::new().analyze::<WorkoutRecord>();

    let config = FormsConfig::from_toml_str(
        r#"
        [analyzer]
        required_fields = ["reps", "kind", "tempo"]
        "#,
    )
    .unwrap();
    let reconfigured = PropertyAnalyzer::with_config(&config).analyze::<WorkoutRecord>();

    for (a, b) in default_descriptors.iter().zip(&reconfigured) {
        assert_eq!(a.semantic_type(), b.semantic_type());
        assert_eq!(field_kind(a), field_kind(b), "kind changed for {}", a.name());
    }
}
