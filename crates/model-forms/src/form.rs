// File: src/form.rs
// Purpose: Dynamic form orchestrator (store ownership and edit/save/cancel lifecycle)

use serde::Serialize;
use std::fmt;

use crate::analyzer::display_name;
use crate::crud::{ModelHooks, NoHooks};
use crate::descriptor::PropertyDescriptor;
use crate::error::FormError;
use crate::field::{FieldInput, FormFieldFactory, RenderedField};
use crate::persistence::Persistence;
use crate::store::{FieldValueStore, ValidationErrorMap};
use model_forms_types::{FieldValue, Model};

/// Lifecycle state of one editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormState {
    Uninitialized,
    Populated,
    Editing,
    Validating,
    Valid,
    Invalid,
    Saving,
    Saved,
    SaveFailed,
    Closed,
}

impl FormState {
    /// States in which field edits are accepted. `Saved` is terminal.
    pub fn accepts_edits(self) -> bool {
        !matches!(
            self,
            FormState::Uninitialized | FormState::Saving | FormState::Saved | FormState::Closed
        )
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormState::Uninitialized => "uninitialized",
            FormState::Populated => "populated",
            FormState::Editing => "editing",
            FormState::Validating => "validating",
            FormState::Valid => "valid",
            FormState::Invalid => "invalid",
            FormState::Saving => "saving",
            FormState::Saved => "saved",
            FormState::SaveFailed => "save failed",
            FormState::Closed => "closed",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormMode {
    Create,
    Edit,
    /// Read-only view of an existing entity
    Detail,
}

impl FormMode {
    pub fn is_editing(self) -> bool {
        !matches!(self, FormMode::Detail)
    }
}

type SaveCallback<M> = Box<dyn FnMut(&M)>;
type CancelCallback = Box<dyn FnMut()>;

/// One editing session over a model type.
///
/// Owns the field-value store and the validation error map. Nothing reaches
/// the persistence collaborator before [`DynamicForm::save`], and `save`
/// refuses to run while any field has an error.
pub struct DynamicForm<M: Model> {
    mode: FormMode,
    descriptors: Vec<PropertyDescriptor>,
    factory: FormFieldFactory,
    store: FieldValueStore,
    errors: ValidationErrorMap,
    state: FormState,
    last_failure: Option<String>,
    on_save: Option<SaveCallback<M>>,
    on_cancel: Option<CancelCallback>,
}

impl<M: Model> DynamicForm<M> {
    pub fn new(mode: FormMode, descriptors: Vec<PropertyDescriptor>, factory: FormFieldFactory) -> Self {
        Self {
            mode,
            descriptors,
            factory,
            store: FieldValueStore::new(),
            errors: ValidationErrorMap::new(),
            state: FormState::Uninitialized,
            last_failure: None,
            on_save: None,
            on_cancel: None,
        }
    }

    /// Called with the persisted entity after a successful save
    pub fn on_save(mut self, callback: impl FnMut(&M) + 'static) -> Self {
        self.on_save = Some(Box::new(callback));
        self
    }

    /// Called once when the form is cancelled
    pub fn on_cancel(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }

    /// Seed the store and validate every field.
    ///
    /// With an entity, each property's current value is copied in; without
    /// one, per-type defaults are used.
    pub fn open(&mut self, entity: Option<&M>) -> Result<(), FormError> {
        if self.state != FormState::Uninitialized {
            return Err(FormError::NotEditable(self.state));
        }
        self.populate(entity);
        Ok(())
    }

    pub(crate) fn opened(mut self, entity: Option<&M>) -> Self {
        self.populate(entity);
        self
    }

    fn populate(&mut self, entity: Option<&M>) {
        self.store = match entity {
            Some(entity) => FieldValueStore::from_entity(entity, &self.descriptors),
            None => FieldValueStore::with_defaults(&self.descriptors),
        };
        self.transition(FormState::Populated);
        self.revalidate();
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    pub fn store(&self) -> &FieldValueStore {
        &self.store
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.store.get(name)
    }

    pub fn errors(&self) -> &ValidationErrorMap {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Message of the most recent failed save
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// `New Workout Record`, `Edit Workout Record` or `Workout Record`
    pub fn title(&self) -> String {
        let model = display_name(M::model_name());
        match self.mode {
            FormMode::Create => format!("New {}", model),
            FormMode::Edit => format!("Edit {}", model),
            FormMode::Detail => model,
        }
    }

    /// Every field, in descriptor order
    pub fn fields(&self) -> Vec<RenderedField> {
        let editable = self.mode.is_editing() && self.state.accepts_edits();
        self.descriptors
            .iter()
            .map(|d| {
                self.factory
                    .render(d, self.store.get(d.name()), editable, self.error(d.name()))
            })
            .collect()
    }

    /// Replace a property's value and revalidate that property
    pub fn set_value(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), FormError> {
        self.ensure_editable()?;
        if self.descriptor(name).is_none() {
            return Err(FormError::UnknownProperty(name.to_string()));
        }

        tracing::debug!(model = M::model_name(), property = name, value = ?value, "Field edited");
        self.store.set(name, value);
        self.transition(FormState::Editing);
        self.revalidate_property(name);
        Ok(())
    }

    /// Bind a user input through the field factory, then store it
    pub fn apply_input(&mut self, name: &str, input: FieldInput) -> Result<(), FormError> {
        self.ensure_editable()?;
        let descriptor = self
            .descriptor(name)
            .ok_or_else(|| FormError::UnknownProperty(name.to_string()))?;

        let value = self
            .factory
            .bind(descriptor, self.store.get(name), input)
            .map_err(|e| FormError::bind(name, e))?;
        self.set_value(name, value)
    }

    /// Recompute the whole error map
    pub fn revalidate(&mut self) {
        self.transition(FormState::Validating);
        self.errors = self
            .descriptors
            .iter()
            .filter_map(|d| {
                d.validate(self.store.get(d.name()))
                    .message()
                    .map(|message| (d.name().to_string(), message.to_string()))
            })
            .collect();
        self.finish_validation();
    }

    pub fn can_save(&self) -> bool {
        self.mode.is_editing()
            && self.errors.is_empty()
            && matches!(self.state, FormState::Valid | FormState::SaveFailed)
    }

    /// Build an entity from the store and persist it
    pub async fn save<P>(&mut self, persistence: &mut P) -> Result<M, FormError>
    where
        P: Persistence<M>,
    {
        self.save_with(persistence, &NoHooks).await
    }

    /// [`DynamicForm::save`] with lifecycle hooks run around the persistence call
    pub async fn save_with<P, H>(&mut self, persistence: &mut P, hooks: &H) -> Result<M, FormError>
    where
        P: Persistence<M>,
        H: ModelHooks<M>,
    {
        if !self.mode.is_editing() {
            return Err(FormError::ReadOnly);
        }
        if !self.errors.is_empty() {
            tracing::warn!(
                model = M::model_name(),
                errors = self.errors.len(),
                "Save blocked by validation errors"
            );
            return Err(FormError::Invalid(self.errors.clone()));
        }
        if !self.can_save() {
            return Err(FormError::NotEditable(self.state));
        }

        self.transition(FormState::Saving);
        match self.commit(persistence, hooks).await {
            Ok(entity) => {
                self.last_failure = None;
                self.transition(FormState::Saved);
                tracing::info!(
                    model = M::model_name(),
                    backend = persistence.name(),
                    "Saved entity"
                );
                if let Some(callback) = self.on_save.as_mut() {
                    callback(&entity);
                }
                Ok(entity)
            }
            Err(e) => {
                // Store is kept so the user can retry
                self.last_failure = Some(e.to_string());
                self.transition(FormState::SaveFailed);
                tracing::error!(
                    model = M::model_name(),
                    backend = persistence.name(),
                    error = %e,
                    "Save failed"
                );
                Err(e)
            }
        }
    }

    /// Discard the store and close the session. No-op once closed.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        match self.state {
            FormState::Saving => return Err(FormError::NotEditable(self.state)),
            FormState::Closed => return Ok(()),
            _ => {}
        }

        self.store.clear();
        self.errors.clear();
        self.transition(FormState::Closed);
        if let Some(callback) = self.on_cancel.as_mut() {
            callback();
        }
        Ok(())
    }

    /// Fresh entity with every stored value assigned.
    ///
    /// Absent values on non-optional properties are skipped, leaving the
    /// instantiated value in place.
    pub fn build_entity<P>(&self, persistence: &P) -> Result<M, FormError>
    where
        P: Persistence<M>,
    {
        let mut entity = persistence.instantiate();
        for descriptor in &self.descriptors {
            let value = self.store.get(descriptor.name()).cloned();
            if value.is_none() && !descriptor.is_optional() {
                continue;
            }
            entity.set(descriptor.name(), value)?;
        }
        Ok(entity)
    }

    async fn commit<P, H>(&self, persistence: &mut P, hooks: &H) -> Result<M, FormError>
    where
        P: Persistence<M>,
        H: ModelHooks<M>,
    {
        let mut entity = self.build_entity(persistence)?;
        hooks.validate(&entity).map_err(FormError::Rejected)?;

        match self.mode {
            FormMode::Edit => hooks.before_update(&mut entity),
            _ => hooks.before_create(&mut entity),
        }

        persistence.save(&entity).await?;

        match self.mode {
            FormMode::Edit => hooks.after_update(&entity),
            _ => hooks.after_create(&entity),
        }
        Ok(entity)
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        if !self.mode.is_editing() {
            return Err(FormError::ReadOnly);
        }
        if !self.state.accepts_edits() {
            return Err(FormError::NotEditable(self.state));
        }
        Ok(())
    }

    fn revalidate_property(&mut self, name: &str) {
        self.transition(FormState::Validating);
        let result = match self.descriptor(name) {
            Some(descriptor) => descriptor.validate(self.store.get(name)),
            None => return,
        };

        match result.message() {
            Some(message) => {
                self.errors.insert(name.to_string(), message.to_string());
            }
            None => {
                self.errors.remove(name);
            }
        }
        self.finish_validation();
    }

    fn finish_validation(&mut self) {
        let next = if self.errors.is_empty() {
            FormState::Valid
        } else {
            FormState::Invalid
        };
        self.transition(next);
    }

    fn transition(&mut self, next: FormState) {
        if self.state != next {
            tracing::debug!(model = M::model_name(), from = %self.state, to = %next, "Form state changed");
            self.state = next;
        }
    }
}

impl<M: Model> fmt::Debug for DynamicForm<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicForm")
            .field("model", &M::model_name())
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("store", &self.store)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
