// File: examples/workout_form.rs
// Purpose: Walk a workout record through create, edit, detail and delete
//
// Run with: RUST_LOG=debug cargo run -p model-forms --example workout_form

use anyhow::Result;
use chrono::{DateTime, Utc};
use model_forms::{
    CrudFacade, Enumeration, FieldInput, FormsConfig, InMemoryPersistence, Model, RelatedId,
    StepDirection,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Enumeration)]
enum WorkoutKind {
    #[default]
    Run,
    Lift,
    Ride,
}

#[derive(Debug, Clone, Default, PartialEq, Model)]
struct WorkoutRecord {
    id: String,
    title: String,
    date: DateTime<Utc>,
    reps: i32,
    start_weight_kg: Option<f64>,
    completed: bool,
    kind: WorkoutKind,
    partner: Option<RelatedId>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = FormsConfig::load();
    let mut crud = CrudFacade::with_config(InMemoryPersistence::<WorkoutRecord>::new(), &config);
    crud.register_enum::<WorkoutKind>();

    let mut form = crud.create_view();
    println!("== {} ==", form.title());
    for field in form.fields() {
        println!(
            "{:<16} {:<20} {:?}{}",
            field.label,
            field.kind.to_string(),
            field.widget,
            field.error.map(|e| format!("  <- {}", e)).unwrap_or_default()
        );
    }

    // Save is refused until required fields are filled in
    if let Err(e) = crud.save(&mut form).await {
        println!("save refused: {}", e);
    }

    form.apply_input("id", FieldInput::Text("w-1".into()))?;
    form.apply_input("title", FieldInput::Text("Squat session".into()))?;
    form.apply_input("kind", FieldInput::Case("Lift".into()))?;
    form.apply_input("start_weight_kg", FieldInput::Number("80".into()))?;
    for _ in 0..5 {
        form.apply_input("reps", FieldInput::Step(StepDirection::Increment))?;
    }

    let saved = crud.save(&mut form).await?;
    println!("saved: {:?}", saved);

    let mut edit = crud.edit_view(
        &saved,
        |record| println!("on_save: {} now has {} reps", record.title, record.reps),
        || println!("on_cancel"),
    );
    println!("== {} ==", edit.title());
    edit.apply_input("completed", FieldInput::Toggle(true))?;
    edit.apply_input("reps", FieldInput::Number("8".into()))?;
    let updated = crud.save(&mut edit).await?;

    let detail = crud.detail_view(&updated);
    println!("== {} ==", detail.title());
    println!("{}", serde_json::to_string_pretty(&detail.fields())?);

    crud.delete(&updated).await?;
    println!("records left: {}", crud.persistence().len());

    Ok(())
}
