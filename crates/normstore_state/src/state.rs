//! The normalized entity state model.
//!
//! A `State` keeps every entity in a `by_id` map and the set of known ids,
//! in insertion order, in `all_ids`. On top of that it carries three
//! selection slots: a single `current` entity, a `current_by_id` reference,
//! and an `active` multi-selection.

use normstore_foundation::{Id, IdList, IdMap, Record, Value};

#[cfg(feature = "serde")]
use normstore_foundation::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::mutators::add_entity_to_state;

/// An entity as held by the store: the caller's record plus a dirty flag.
///
/// The dirty flag is owned by the store. Callers never set it through the
/// record; it changes only through store operations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StoredEntity {
    record: Record,
    is_dirty: bool,
}

impl StoredEntity {
    /// Wraps a record as a clean (not dirty) stored entity.
    #[must_use]
    pub fn clean(record: Record) -> Self {
        Self {
            record,
            is_dirty: false,
        }
    }

    /// Wraps a record with an explicit dirty flag.
    #[must_use]
    pub fn new(record: Record, is_dirty: bool) -> Self {
        Self { record, is_dirty }
    }

    /// Returns the entity's id.
    #[must_use]
    pub fn id(&self) -> &Id {
        self.record.id()
    }

    /// Returns true if the entity has been modified since it was stored.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Gets a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.record.get(field)
    }

    /// Returns the underlying record.
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Unwraps the underlying record, dropping the dirty flag.
    #[must_use]
    pub fn into_record(self) -> Record {
        self.record
    }

    pub(crate) fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    pub(crate) fn set_dirty(&mut self, is_dirty: bool) {
        self.is_dirty = is_dirty;
    }
}

/// The single aggregate root of an entity store.
///
/// # Invariants
/// - The key set of `by_id` equals the set of ids in `all_ids`.
/// - `all_ids` has no duplicates and is in insertion order.
/// - `active` has no duplicates. Its ids need not exist in `by_id`.
/// - `current` need not exist in `by_id`.
/// - `current_by_id`, when set, names a stored entity.
///
/// The mutators in [`crate::mutators`] preserve these invariants; the
/// fields are read-only from outside this crate. With the `serde` feature,
/// decoding rebuilds the state through the same mutators and fails on
/// input that would break an invariant.
///
/// Clone is O(1) due to structural sharing, so snapshots are cheap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "StateRepr", try_from = "StateRepr"))]
pub struct State {
    pub(crate) by_id: IdMap<StoredEntity>,
    pub(crate) all_ids: IdList,
    pub(crate) current: Option<StoredEntity>,
    pub(crate) current_by_id: Option<Id>,
    pub(crate) active: IdList,
}

impl State {
    /// Creates a new empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities keyed by id.
    #[must_use]
    pub fn by_id(&self) -> &IdMap<StoredEntity> {
        &self.by_id
    }

    /// Known ids in insertion order.
    #[must_use]
    pub fn all_ids(&self) -> &IdList {
        &self.all_ids
    }

    /// The entity currently being edited or viewed.
    #[must_use]
    pub fn current(&self) -> Option<&StoredEntity> {
        self.current.as_ref()
    }

    /// Id of the entity selected by reference, unresolved.
    #[must_use]
    pub fn current_by_id(&self) -> Option<&Id> {
        self.current_by_id.as_ref()
    }

    /// Active (multi-selected) ids, oldest first.
    #[must_use]
    pub fn active(&self) -> &IdList {
        &self.active
    }

    /// Number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.all_ids.len()
    }

    /// Returns true if no entities are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all_ids.is_empty()
    }

    /// Returns true if an entity with this id is stored.
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.by_id.contains_key(id)
    }

    /// Sets the `current` slot.
    ///
    /// The entity is stored clean regardless of its previous dirty state.
    pub fn set_current(&mut self, record: Record) {
        self.current = Some(StoredEntity::clean(record));
    }

    /// Clears the `current` slot, returning what was there.
    pub fn take_current(&mut self) -> Option<StoredEntity> {
        self.current.take()
    }

    /// Points `current_by_id` at `id` if that entity is stored.
    ///
    /// Returns false, leaving the slot unchanged, if `id` is absent.
    pub fn select_by_id(&mut self, id: &Id) -> bool {
        if !self.by_id.contains_key(id) {
            return false;
        }
        self.current_by_id = Some(id.clone());
        true
    }

    /// Clears the `current_by_id` slot.
    pub fn clear_current_by_id(&mut self) {
        self.current_by_id = None;
    }

    /// Adds `id` to the active set. Returns false if it was already active.
    pub fn activate(&mut self, id: Id) -> bool {
        self.active.push_unique(id)
    }

    /// Empties the active set.
    pub fn clear_active(&mut self) {
        self.active.clear();
    }

    /// Severs every selection that references `id`.
    ///
    /// Clears `current` and `current_by_id` if they point at `id` and drops
    /// `id` from `active`.
    pub fn release_selection(&mut self, id: &Id) {
        if self.current.as_ref().is_some_and(|c| c.id() == id) {
            self.current = None;
        }
        if self.current_by_id.as_ref() == Some(id) {
            self.current_by_id = None;
        }
        self.active.remove(id);
    }
}

/// Encoded form of a [`State`].
///
/// Entities are listed once, in `all_ids` order, so the index and the order
/// are rebuilt from a single sequence.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct StateRepr {
    entities: Vec<StoredEntity>,
    current: Option<StoredEntity>,
    current_by_id: Option<Id>,
    active: Vec<Id>,
}

#[cfg(feature = "serde")]
impl From<State> for StateRepr {
    fn from(state: State) -> Self {
        let entities = state
            .all_ids
            .iter()
            .filter_map(|id| state.by_id.get(id).cloned())
            .collect();
        Self {
            entities,
            current: state.current,
            current_by_id: state.current_by_id,
            active: state.active.into(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<StateRepr> for State {
    type Error = Error;

    fn try_from(repr: StateRepr) -> Result<Self, Error> {
        let mut state = State::new();
        for entity in repr.entities {
            let id = entity.id().clone();
            if add_entity_to_state(&mut state, entity).is_some() {
                return Err(Error::inconsistent_state(format!("entity {id} is listed twice")));
            }
        }

        if let Some(id) = repr.current_by_id.as_ref().filter(|&id| !state.contains(id)) {
            return Err(Error::inconsistent_state(format!(
                "current_by_id {id} is not a stored entity"
            )));
        }
        state.current_by_id = repr.current_by_id;
        state.current = repr.current;

        for id in repr.active {
            if state.active.contains(&id) {
                return Err(Error::inconsistent_state(format!("active id {id} is listed twice")));
            }
            state.active.push_back(id);
        }
        Ok(state)
    }
}
