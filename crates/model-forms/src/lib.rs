//! # model-forms
//!
//! Schema-driven forms for arbitrary model types: derive the schema once, get
//! property descriptors, field kinds, composed validation and a
//! create/edit/save/cancel lifecycle with no per-type form code.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use model_forms::{CrudFacade, Enumeration, FieldInput, InMemoryPersistence, Model};
//!
//! #[derive(Debug, Clone, Copy, Default, PartialEq, Enumeration)]
//! enum WorkoutKind {
//!     #[default]
//!     Run,
//!     Lift,
//! }
//!
//! #[derive(Debug, Clone, Default, PartialEq, Model)]
//! struct WorkoutRecord {
//!     title: String,
//!     reps: i32,
//!     weight_kg: Option<f64>,
//!     kind: WorkoutKind,
//! }
//!
//! let mut crud = CrudFacade::new(InMemoryPersistence::<WorkoutRecord>::new());
//! crud.register_enum::<WorkoutKind>();
//!
//! let mut form = crud.create_view();
//! form.apply_input("title", FieldInput::Text("Leg day".into()))?;
//! let saved = crud.save(&mut form).await?;
//! ```
//!
//! ## Architecture
//!
//! This crate builds the engine on three component crates and re-exports them:
//!
//! - **`model-forms-types`** - `FieldValue`, raw type facts, `Model` / `FieldCodec` / `CaseSet`
//! - **`model-forms-validation`** - the validation rule library
//! - **`model-forms-derive`** - `#[derive(Model)]` and `#[derive(Enumeration)]`
//!
//! On top of them:
//!
//! - [`PropertyAnalyzer`] - type facts to sorted [`PropertyDescriptor`]s with rules
//! - [`FormFieldFactory`] - field kinds, rendering and input binding
//! - [`DynamicForm`] - the editing session and its state machine
//! - [`CrudFacade`] - wiring of a model type to a [`Persistence`] collaborator

// Generated code refers to `::model_forms`, which must also resolve in this crate.
extern crate self as model_forms;

pub mod analyzer;
pub mod config;
pub mod crud;
pub mod descriptor;
pub mod error;
pub mod field;
pub mod form;
pub mod persistence;
pub mod store;

pub use model_forms_derive::{Enumeration, Model};
pub use model_forms_types as types;
pub use model_forms_validation as validation;

pub use analyzer::{display_name, PropertyAnalyzer};
pub use config::FormsConfig;
pub use crud::{CrudFacade, ModelHooks, NoHooks};
pub use descriptor::{PropertyDescriptor, SemanticType};
pub use error::{BindError, FormError, PersistenceError};
pub use field::{
    field_kind, EnumCatalog, FieldInput, FieldWidget, FormFieldFactory, FormFieldKind,
    RenderedField, StepDirection,
};
pub use form::{DynamicForm, FormMode, FormState};
pub use persistence::{InMemoryPersistence, Persistence};
pub use store::{default_value, FieldValueStore, ValidationErrorMap};

pub use model_forms_types::{CaseSet, FieldValue, Model, RelatedId};
pub use model_forms_validation::{ValidationResult, ValidationRule};
