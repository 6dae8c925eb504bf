// File: src/crud.rs
// Purpose: Generic CRUD facade and model lifecycle hooks

use std::marker::PhantomData;

use crate::analyzer::PropertyAnalyzer;
use crate::config::FormsConfig;
use crate::descriptor::PropertyDescriptor;
use crate::error::FormError;
use crate::field::{FormFieldFactory, FormFieldKind};
use crate::form::{DynamicForm, FormMode};
use crate::persistence::Persistence;
use model_forms_types::{CaseSet, FieldValue, Model};
use model_forms_validation::ValidationResult;

/// Per-model hooks run around persistence.
///
/// Every method has a no-op default, so implementors override only what they need.
pub trait ModelHooks<M> {
    /// Whole-entity check after the entity is built; `Err` fails the save
    fn validate(&self, _entity: &M) -> Result<(), String> {
        Ok(())
    }

    fn before_create(&self, _entity: &mut M) {}

    fn after_create(&self, _entity: &M) {}

    fn before_update(&self, _entity: &mut M) {}

    fn after_update(&self, _entity: &M) {}

    /// Return `false` to veto the delete
    fn before_delete(&self, _entity: &M) -> bool {
        true
    }

    fn after_delete(&self, _entity: &M) {}
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<M> ModelHooks<M> for NoHooks {}

/// Binds a model type to the form engine and a persistence collaborator
pub struct CrudFacade<M, P, H = NoHooks> {
    analyzer: PropertyAnalyzer,
    factory: FormFieldFactory,
    persistence: P,
    hooks: H,
    _model: PhantomData<fn() -> M>,
}

impl<M, P> CrudFacade<M, P, NoHooks>
where
    M: Model,
    P: Persistence<M>,
{
    pub fn new(persistence: P) -> Self {
        Self::with_config(persistence, &FormsConfig::default())
    }

    pub fn with_config(persistence: P, config: &FormsConfig) -> Self {
        Self {
            analyzer: PropertyAnalyzer::with_config(config),
            factory: FormFieldFactory::with_config(config),
            persistence,
            hooks: NoHooks,
            _model: PhantomData,
        }
    }
}

impl<M, P, H> CrudFacade<M, P, H>
where
    M: Model,
    P: Persistence<M>,
    H: ModelHooks<M>,
{
    pub fn with_hooks<H2: ModelHooks<M>>(self, hooks: H2) -> CrudFacade<M, P, H2> {
        CrudFacade {
            analyzer: self.analyzer,
            factory: self.factory,
            persistence: self.persistence,
            hooks,
            _model: PhantomData,
        }
    }

    /// Make enum pickers available for `E`
    pub fn register_enum<E: CaseSet>(&mut self) -> &mut Self {
        self.factory.register::<E>();
        self
    }

    pub fn descriptors(&self) -> Vec<PropertyDescriptor> {
        self.analyzer.analyze::<M>()
    }

    pub fn field_kind(&self, descriptor: &PropertyDescriptor) -> FormFieldKind {
        self.factory.field_kind(descriptor)
    }

    pub fn validate(&self, descriptor: &PropertyDescriptor, value: Option<&FieldValue>) -> ValidationResult {
        self.factory.validate(descriptor, value)
    }

    /// Form seeded with per-type defaults
    pub fn create_view(&self) -> DynamicForm<M> {
        self.form(FormMode::Create).opened(None)
    }

    /// Form seeded from `entity`, with save and cancel callbacks
    pub fn edit_view(
        &self,
        entity: &M,
        on_save: impl FnMut(&M) + 'static,
        on_cancel: impl FnMut() + 'static,
    ) -> DynamicForm<M> {
        self.form(FormMode::Edit)
            .on_save(on_save)
            .on_cancel(on_cancel)
            .opened(Some(entity))
    }

    /// Read-only form over `entity`
    pub fn detail_view(&self, entity: &M) -> DynamicForm<M> {
        self.form(FormMode::Detail).opened(Some(entity))
    }

    /// Save a form through this facade's persistence and hooks
    pub async fn save(&mut self, form: &mut DynamicForm<M>) -> Result<M, FormError> {
        form.save_with(&mut self.persistence, &self.hooks).await
    }

    pub async fn delete(&mut self, entity: &M) -> Result<(), FormError> {
        if !self.hooks.before_delete(entity) {
            tracing::warn!(model = M::model_name(), "Delete vetoed by hook");
            return Err(FormError::Rejected(format!(
                "delete of {} was vetoed",
                M::model_name()
            )));
        }

        if let Err(e) = self.persistence.delete(entity).await {
            tracing::error!(
                model = M::model_name(),
                backend = self.persistence.name(),
                error = %e,
                "Delete failed"
            );
            return Err(e.into());
        }

        self.hooks.after_delete(entity);
        tracing::info!(
            model = M::model_name(),
            backend = self.persistence.name(),
            "Deleted entity"
        );
        Ok(())
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    fn form(&self, mode: FormMode) -> DynamicForm<M> {
        DynamicForm::new(mode, self.descriptors(), self.factory.clone())
    }
}
