/// Fields stored through `#[model(text)]` edit and save as plain text
use chrono::NaiveDate;
use model_forms::{
    CrudFacade, FieldInput, FieldValue, FieldWidget, FormError, FormFieldKind, FormState,
    InMemoryPersistence, Model, PropertyAnalyzer, SemanticType,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq, Model)]
struct RestDay {
    id: String,
    #[model(text)]
    day: NaiveDate,
    #[model(text)]
    total_steps: u128,
    #[model(text)]
    next_session: Option<NaiveDate>,
}

impl Default for RestDay {
    fn default() -> Self {
        Self {
            id: String::new(),
            day: epoch(),
            total_steps: 0,
            next_session: None,
        }
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

type Facade = CrudFacade<RestDay, InMemoryPersistence<RestDay>>;

#[test]
fn test_text_fields_classify_as_text_entry() {
    let descriptors = PropertyAnalyzer::new().analyze::<RestDay>();
    let kinds: Vec<(&str, &SemanticType)> = descriptors
        .iter()
        .map(|d| (d.name(), d.semantic_type()))
        .collect();

    assert_eq!(
        kinds,
        vec![
            ("day", &SemanticType::Unknown),
            ("id", &SemanticType::String),
            ("next_session", &SemanticType::optional(SemanticType::Unknown)),
            ("total_steps", &SemanticType::Unknown),
        ]
    );

    let crud = Facade::new(InMemoryPersistence::new());
    for descriptor in &descriptors {
        assert_eq!(crud.field_kind(descriptor), FormFieldKind::Text);
    }
}

#[tokio::test]
async fn test_create_with_untouched_text_fields_saves() {
    let mut crud = Facade::new(InMemoryPersistence::new());
    let mut form = crud.create_view();
    assert_eq!(form.value("day"), None);
    assert_eq!(form.value("total_steps"), None);

    form.apply_input("id", FieldInput::Text("r-1".into())).unwrap();
    assert_eq!(form.state(), FormState::Valid);

    let saved = crud.save(&mut form).await.unwrap();
    assert_eq!(form.state(), FormState::Saved);
    assert_eq!(saved.day, epoch());
    assert_eq!(saved.total_steps, 0);
    assert_eq!(saved.next_session, None);
}

#[tokio::test]
async fn test_text_fields_round_trip_through_edit() {
    let mut crud = Facade::new(InMemoryPersistence::new());
    let mut form = crud.create_view();
    form.apply_input("id", FieldInput::Text("r-2".into())).unwrap();
    form.apply_input("day", FieldInput::Text("2024-05-01".into())).unwrap();
    form.apply_input("total_steps", FieldInput::Text(u128::MAX.to_string())).unwrap();
    form.apply_input("next_session", FieldInput::Text("2024-05-03".into())).unwrap();
    let saved = crud.save(&mut form).await.unwrap();

    assert_eq!(saved.day, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    assert_eq!(saved.total_steps, u128::MAX);
    assert_eq!(saved.next_session, NaiveDate::from_ymd_opt(2024, 5, 3));

    let mut edit = crud.edit_view(&saved, |_| {}, || {});
    let day = edit.fields().into_iter().find(|f| f.name == "day").unwrap();
    assert_eq!(day.widget, FieldWidget::Text { text: "2024-05-01".into() });
    assert_eq!(edit.value("total_steps"), Some(&FieldValue::String(u128::MAX.to_string())));

    let resaved = crud.save(&mut edit).await.unwrap();
    assert_eq!(resaved, saved);
}

#[tokio::test]
async fn test_unparsable_text_fails_save_and_allows_retry() {
    let mut crud = Facade::new(InMemoryPersistence::new());
    let mut form = crud.create_view();
    form.apply_input("id", FieldInput::Text("r-3".into())).unwrap();
    form.apply_input("day", FieldInput::Text("someday".into())).unwrap();

    let err = crud.save(&mut form).await.unwrap_err();
    assert!(matches!(err, FormError::Construction(_)));
    assert_eq!(form.state(), FormState::SaveFailed);
    assert!(crud.persistence().is_empty());

    form.apply_input("day", FieldInput::Text("2024-06-10".into())).unwrap();
    let saved = crud.save(&mut form).await.unwrap();
    assert_eq!(saved.day, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
}
