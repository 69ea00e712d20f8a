//! Read-only projections over a [`State`].
//!
//! Every getter is recomputed from `by_id` / `all_ids` on each call. Nothing
//! is cached, so results always reflect the state at call time.

use std::collections::HashSet;

use normstore_foundation::{Id, IdList, IdMap, Record};
use normstore_state::{State, StoredEntity};

/// Predicate over stored entities.
///
/// Getters take an `Option<Filter>`; `None` means "no filter" and selects
/// everything.
pub type Filter<'f> = &'f dyn Fn(&StoredEntity) -> bool;

/// Query operations over a borrowed [`State`].
#[derive(Clone, Copy, Debug)]
pub struct Getters<'s> {
    state: &'s State,
}

impl<'s> Getters<'s> {
    /// Binds getters to a state.
    #[must_use]
    pub fn new(state: &'s State) -> Self {
        Self { state }
    }

    /// Returns the stored entity with this id.
    #[must_use]
    pub fn get_one(&self, id: impl Into<Id>) -> Option<&'s StoredEntity> {
        self.state.by_id().get(&id.into())
    }

    /// Returns the stored entities for these ids, in the order given.
    ///
    /// Ids with no stored entity are dropped.
    pub fn get_many<I>(&self, ids: I) -> Vec<&'s StoredEntity>
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        ids.into_iter()
            .filter_map(|id| self.state.by_id().get(&id.into()))
            .collect()
    }

    /// Returns the live `by_id` map.
    #[must_use]
    pub fn get_all(&self) -> &'s IdMap<StoredEntity> {
        self.state.by_id()
    }

    /// Returns every stored entity in `by_id` iteration order (id order).
    #[must_use]
    pub fn get_all_array(&self) -> Vec<&'s StoredEntity> {
        self.state.by_id().values().collect()
    }

    /// Returns a copy of `all_ids`, in insertion order.
    #[must_use]
    pub fn get_all_ids(&self) -> Vec<Id> {
        self.state.all_ids().to_vec()
    }

    /// Returns the ids from `ids` that are not stored.
    ///
    /// Repeats are collapsed to their first occurrence unless
    /// `can_have_duplicates` is true.
    pub fn get_missing_ids<I>(&self, ids: I, can_have_duplicates: bool) -> Vec<Id>
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        let missing = ids
            .into_iter()
            .map(Into::<Id>::into)
            .filter(|id| !self.state.contains(id));
        if can_have_duplicates {
            return missing.collect();
        }

        let mut seen = HashSet::new();
        missing.filter(|id| seen.insert(id.clone())).collect()
    }

    /// Returns the records whose id is not stored.
    #[must_use]
    pub fn get_missing_entities<'r>(&self, records: &'r [Record]) -> Vec<&'r Record> {
        records
            .iter()
            .filter(|record| !self.state.contains(record.id()))
            .collect()
    }

    /// Returns the stored entities matching `filter`, keyed by id.
    ///
    /// With no filter, returns the whole map.
    #[must_use]
    pub fn get_where(&self, filter: Option<Filter<'_>>) -> IdMap<StoredEntity> {
        let Some(filter) = filter else {
            return self.state.by_id().clone();
        };
        self.state
            .by_id()
            .iter()
            .filter(|&(_, entity)| filter(entity))
            .map(|(id, entity)| (id.clone(), entity.clone()))
            .collect()
    }

    /// Returns the stored entities matching `filter`, in id order.
    ///
    /// With no filter, returns every entity.
    #[must_use]
    pub fn get_where_array(&self, filter: Option<Filter<'_>>) -> Vec<&'s StoredEntity> {
        let entities = self.state.by_id().values();
        match filter {
            Some(filter) => entities.filter(|&entity| filter(entity)).collect(),
            None => entities.collect(),
        }
    }

    /// Returns the first stored entity (in id order) matching `filter`.
    ///
    /// With no filter, returns the first entity. Returns `None` if nothing
    /// matches or the store is empty.
    #[must_use]
    pub fn get_first_where(&self, filter: Option<Filter<'_>>) -> Option<&'s StoredEntity> {
        let mut entities = self.state.by_id().values();
        match filter {
            Some(filter) => entities.find(|&entity| filter(entity)),
            None => entities.next(),
        }
    }

    /// Returns true if no entities are stored.
    #[must_use]
    pub fn get_is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Returns true if at least one entity is stored.
    #[must_use]
    pub fn get_is_not_empty(&self) -> bool {
        !self.state.is_empty()
    }

    /// Returns the `current` slot.
    #[must_use]
    pub fn get_current(&self) -> Option<&'s StoredEntity> {
        self.state.current()
    }

    /// Resolves `current_by_id` against the stored entities.
    ///
    /// Returns `None` if nothing is selected.
    #[must_use]
    pub fn get_current_by_id(&self) -> Option<&'s StoredEntity> {
        self.state
            .current_by_id()
            .and_then(|id| self.state.by_id().get(id))
    }

    /// Returns the active ids, oldest first.
    #[must_use]
    pub fn get_active(&self) -> &'s IdList {
        self.state.active()
    }

    /// Returns the oldest active id.
    #[must_use]
    pub fn get_first_active(&self) -> Option<&'s Id> {
        self.state.active().first()
    }

    /// Returns true if an entity with this id is stored.
    #[must_use]
    pub fn is_already_in_store(&self, id: impl Into<Id>) -> bool {
        self.state.contains(&id.into())
    }

    /// Returns true if this id is active.
    #[must_use]
    pub fn is_already_active(&self, id: impl Into<Id>) -> bool {
        self.state.active().contains(&id.into())
    }

    /// Returns the dirty flag of the stored entity, or false if it is absent.
    #[must_use]
    pub fn is_dirty(&self, id: impl Into<Id>) -> bool {
        self.state
            .by_id()
            .get(&id.into())
            .is_some_and(StoredEntity::is_dirty)
    }

    /// Case-insensitive substring search over every top-level string value
    /// of every stored entity (a string id included).
    ///
    /// Results are in id order.
    #[must_use]
    pub fn search(&self, text: &str) -> Vec<&'s StoredEntity> {
        let needle = text.to_lowercase();
        self.state
            .by_id()
            .values()
            .filter(|entity| {
                entity
                    .record()
                    .string_values()
                    .any(|value| value.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Alias of [`Getters::get_one`].
    #[must_use]
    pub fn find_one_by_id(&self, id: impl Into<Id>) -> Option<&'s StoredEntity> {
        self.get_one(id)
    }

    /// Alias of [`Getters::get_many`].
    pub fn find_many_by_id<I>(&self, ids: I) -> Vec<&'s StoredEntity>
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        self.get_many(ids)
    }
}
