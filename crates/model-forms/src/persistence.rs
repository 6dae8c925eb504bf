//! Persistence collaborator trait and an in-memory backend

use async_trait::async_trait;

use crate::error::PersistenceError;
use model_forms_types::Model;

/// Stores entities on behalf of a form.
///
/// The engine never queries or lists; it hands over one entity per session.
#[async_trait(?Send)]
pub trait Persistence<M: Model> {
    /// Fresh entity that a saved form is assigned onto
    fn instantiate(&self) -> M;

    /// Create or update an entity
    async fn save(&mut self, entity: &M) -> Result<(), PersistenceError>;

    async fn delete(&mut self, entity: &M) -> Result<(), PersistenceError>;

    /// Backend name for logs
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// In-memory backend.
///
/// Entities are matched by their `id` property; entities without one are
/// matched by comparing every property value.
#[derive(Debug, Clone)]
pub struct InMemoryPersistence<M> {
    entities: Vec<M>,
    fail_next: Option<String>,
}

impl<M> InMemoryPersistence<M> {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            fail_next: None,
        }
    }

    pub fn entities(&self) -> &[M] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Reject the next save or delete with `reason`
    pub fn fail_next(&mut self, reason: impl Into<String>) {
        self.fail_next = Some(reason.into());
    }

    fn take_failure(&mut self) -> Result<(), PersistenceError> {
        match self.fail_next.take() {
            Some(reason) => Err(PersistenceError::Rejected(reason)),
            None => Ok(()),
        }
    }
}

impl<M> Default for InMemoryPersistence<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> InMemoryPersistence<M> {
    fn position(&self, entity: &M) -> Option<usize> {
        match entity.get("id") {
            Some(id) => self
                .entities
                .iter()
                .position(|stored| stored.get("id").as_ref() == Some(&id)),
            None => self
                .entities
                .iter()
                .position(|stored| same_values(stored, entity)),
        }
    }
}

fn same_values<M: Model>(a: &M, b: &M) -> bool {
    M::properties()
        .iter()
        .all(|p| a.get(&p.name) == b.get(&p.name))
}

fn describe<M: Model>(entity: &M) -> String {
    match entity.get("id") {
        Some(id) => format!("{} {}", M::model_name(), id),
        None => M::model_name().to_string(),
    }
}

#[async_trait(?Send)]
impl<M: Model + Default + Clone> Persistence<M> for InMemoryPersistence<M> {
    fn instantiate(&self) -> M {
        M::default()
    }

    async fn save(&mut self, entity: &M) -> Result<(), PersistenceError> {
        self.take_failure()?;
        match self.position(entity) {
            Some(idx) => self.entities[idx] = entity.clone(),
            None => self.entities.push(entity.clone()),
        }
        Ok(())
    }

    async fn delete(&mut self, entity: &M) -> Result<(), PersistenceError> {
        self.take_failure()?;
        let idx = self
            .position(entity)
            .ok_or_else(|| PersistenceError::NotFound(describe(entity)))?;
        self.entities.remove(idx);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
