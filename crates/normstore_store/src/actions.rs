//! The write API of an entity store.
//!
//! Actions compose the state mutators, run the configured validation and
//! lifecycle hooks, and keep the selection slots consistent with deletions.
//!
//! Only creation can fail, and only through validation. Every other
//! operation on an absent id does nothing and returns normally; the return
//! values say whether anything changed.

use normstore_foundation::{Error, ErrorContext, Id, Record, Result, Value};
use normstore_state::{
    State, StoredEntity, add_entity_to_state, remove_entity_from_state, set_entity_dirty,
    update_entity_in_state,
};
use tracing::{debug, trace, warn};

use crate::config::{StoreConfig, Validation};

/// Mutating operations over a borrowed [`State`].
///
/// Built by [`crate::EntityStore::actions`], or directly from a state and a
/// configuration owned elsewhere.
pub struct Actions<'s> {
    state: &'s mut State,
    config: &'s mut StoreConfig,
}

impl<'s> Actions<'s> {
    /// Binds actions to a state and its configuration.
    pub fn new(state: &'s mut State, config: &'s mut StoreConfig) -> Self {
        Self { state, config }
    }

    /// Read access to the bound state.
    #[must_use]
    pub fn state(&self) -> &State {
        self.state
    }

    /// Creates an entity.
    ///
    /// Creating an id that is already stored overwrites the stored entity
    /// (last write wins) without reordering `all_ids`. The new entity is
    /// clean.
    ///
    /// # Errors
    ///
    /// Returns a validation failure if the configured validator rejects the
    /// record. The state is left unchanged in that case.
    pub fn create_one(&mut self, record: Record) -> Result<()> {
        match self.config.validate(&record) {
            Validation::Valid => {}
            Validation::Invalid => return Err(self.rejected(&record, None)),
            Validation::Rejected(reason) => return Err(self.rejected(&record, Some(reason))),
        }

        let replaced = add_entity_to_state(self.state, StoredEntity::clean(record.clone()));
        debug!(
            store = self.config.name(),
            id = %record.id(),
            replaced = replaced.is_some(),
            "entity created"
        );
        self.config.entity_created(&record);
        Ok(())
    }

    /// Creates each record in order.
    ///
    /// # Errors
    ///
    /// Stops at the first validation failure. Records created before the
    /// failure stay in the store; the rest are not attempted. The error
    /// context carries the index of the failing record.
    pub fn create_many(&mut self, records: impl IntoIterator<Item = Record>) -> Result<()> {
        for (index, record) in records.into_iter().enumerate() {
            self.create_one(record)
                .map_err(|err| err.with_context(self.batch_context("create_many", index)))?;
        }
        Ok(())
    }

    /// Shallow-merges `patch` onto the entity with this id and marks it dirty.
    ///
    /// If the id is not stored, falls back to [`Actions::create_one`] with
    /// `patch` as a complete record; the created entity is keyed by the
    /// patch's own id and is clean.
    ///
    /// # Errors
    ///
    /// Only the create fallback can fail, with a validation failure.
    pub fn update_one(&mut self, id: impl Into<Id>, patch: Record) -> Result<()> {
        let id = id.into();
        let Some(previous) = self.state.by_id().get(&id).cloned() else {
            trace!(store = self.config.name(), %id, "update of absent entity falls back to create");
            return self.create_one(patch);
        };

        update_entity_in_state(self.state, &id, &patch);
        set_entity_dirty(self.state, &id, true);
        debug!(store = self.config.name(), %id, fields = patch.len(), "entity updated");
        self.config.entity_updated(&patch, &previous);
        Ok(())
    }

    /// Updates each record in order, keyed by the record's own id.
    ///
    /// # Errors
    ///
    /// Stops at the first failing create fallback, like
    /// [`Actions::create_many`].
    pub fn update_many(&mut self, records: impl IntoIterator<Item = Record>) -> Result<()> {
        for (index, record) in records.into_iter().enumerate() {
            let id = record.id().clone();
            self.update_one(id, record)
                .map_err(|err| err.with_context(self.batch_context("update_many", index)))?;
        }
        Ok(())
    }

    /// Deletes the entity with this id.
    ///
    /// Also clears `current` and `current_by_id` if they reference the id,
    /// and drops it from `active`. Returns true if an entity was removed.
    pub fn delete_one(&mut self, id: impl Into<Id>) -> bool {
        let id = id.into();
        let Some(removed) = remove_entity_from_state(self.state, &id) else {
            trace!(store = self.config.name(), %id, "delete of absent entity ignored");
            return false;
        };

        self.state.release_selection(&id);
        debug!(store = self.config.name(), %id, "entity deleted");
        self.config.entity_deleted(&removed);
        true
    }

    /// Deletes each id in order. Returns how many entities were removed.
    pub fn delete_many<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        let mut removed = 0;
        for id in ids {
            if self.delete_one(id) {
                removed += 1;
            }
        }
        removed
    }

    /// Sets the `current` slot. The entity is stored clean.
    ///
    /// The record does not have to exist in the store.
    pub fn set_current(&mut self, record: Record) {
        debug!(store = self.config.name(), id = %record.id(), "current set");
        self.state.set_current(record);
    }

    /// Clears the `current` slot.
    pub fn remove_current(&mut self) {
        self.state.take_current();
    }

    /// Selects the stored entity with this id as `current_by_id`.
    ///
    /// Returns false, leaving the selection unchanged, if the id is absent.
    pub fn set_current_by_id(&mut self, id: impl Into<Id>) -> bool {
        let id = id.into();
        let selected = self.state.select_by_id(&id);
        if !selected {
            trace!(store = self.config.name(), %id, "selection of absent entity ignored");
        }
        selected
    }

    /// Clears `current_by_id`.
    pub fn remove_current_by_id(&mut self) {
        self.state.clear_current_by_id();
    }

    /// Marks an id active. Returns false if it already was.
    ///
    /// The id does not have to exist in the store.
    pub fn set_active(&mut self, id: impl Into<Id>) -> bool {
        self.state.activate(id.into())
    }

    /// Clears the active set.
    pub fn reset_active(&mut self) {
        self.state.clear_active();
    }

    /// Marks the entity dirty. Returns false if the id is absent.
    pub fn set_is_dirty(&mut self, id: impl Into<Id>) -> bool {
        self.set_dirty_flag(id.into(), true)
    }

    /// Marks the entity clean. Returns false if the id is absent.
    pub fn set_is_not_dirty(&mut self, id: impl Into<Id>) -> bool {
        self.set_dirty_flag(id.into(), false)
    }

    /// Sets a single field on the entity and marks it dirty.
    ///
    /// Returns false, changing nothing, if the id is absent. Does not fire
    /// the update hook.
    pub fn update_field(
        &mut self,
        field: &str,
        value: impl Into<Value>,
        id: impl Into<Id>,
    ) -> bool {
        let id = id.into();
        let patch = Record::new(id.clone()).with(field, value);
        if !update_entity_in_state(self.state, &id, &patch) {
            trace!(store = self.config.name(), %id, field, "field update of absent entity ignored");
            return false;
        }
        set_entity_dirty(self.state, &id, true);
        debug!(store = self.config.name(), %id, field, "field updated");
        true
    }

    fn set_dirty_flag(&mut self, id: Id, is_dirty: bool) -> bool {
        let changed = set_entity_dirty(self.state, &id, is_dirty);
        if !changed {
            trace!(
                store = self.config.name(),
                %id,
                is_dirty,
                "dirty flag on absent entity ignored"
            );
        }
        changed
    }

    fn rejected(&self, record: &Record, reason: Option<String>) -> Error {
        warn!(
            store = self.config.name(),
            id = %record.id(),
            reason = reason.as_deref().unwrap_or_default(),
            "entity rejected by validator"
        );
        Error::validation_failed(record.id().clone(), reason).with_context(
            ErrorContext::new()
                .with_store(self.config.name())
                .with_operation("create_one"),
        )
    }

    fn batch_context(&self, operation: &str, index: usize) -> ErrorContext {
        ErrorContext::new()
            .with_store(self.config.name())
            .with_operation(operation)
            .with_index(index)
    }
}
