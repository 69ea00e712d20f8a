//! Primitive, invariant-preserving edits to a [`State`].
//!
//! None of these fail. Operating on an absent id is a silent no-op; callers
//! that need strictness check existence first. Each mutator reports through
//! its return value whether it changed anything, so callers can log or
//! branch without a second lookup.

use normstore_foundation::{Id, Record};

use crate::state::{State, StoredEntity};

/// Inserts `entity` under its own id.
///
/// The id is appended to `all_ids` only if it is not already there. The
/// stored value is overwritten unconditionally (last write wins).
///
/// Membership is decided by `by_id`, which holds exactly the ids of
/// `all_ids`, so the check is a map lookup rather than a list scan.
///
/// Returns the entity previously stored under that id, if any.
pub fn add_entity_to_state(state: &mut State, entity: StoredEntity) -> Option<StoredEntity> {
    let id = entity.id().clone();
    let previous = state.by_id.insert(id.clone(), entity);
    if previous.is_none() {
        state.all_ids.push_back(id);
    }
    previous
}

/// Removes the entity with this id from `by_id` and `all_ids`.
///
/// Returns the removed entity, or `None` if it was absent.
pub fn remove_entity_from_state(state: &mut State, id: &Id) -> Option<StoredEntity> {
    let removed = state.by_id.remove(id)?;
    state.all_ids.remove(id);
    Some(removed)
}

/// Shallow-merges `patch` onto the stored entity with this id.
///
/// Does not touch the dirty flag. Returns false if `id` is absent.
pub fn update_entity_in_state(state: &mut State, id: &Id, patch: &Record) -> bool {
    match state.by_id.get_mut(id) {
        Some(entity) => {
            entity.record_mut().merge(patch);
            true
        }
        None => false,
    }
}

/// Sets the dirty flag on the stored entity with this id.
///
/// Returns false if `id` is absent.
pub fn set_entity_dirty(state: &mut State, id: &Id, is_dirty: bool) -> bool {
    match state.by_id.get_mut(id) {
        Some(entity) => {
            entity.set_dirty(is_dirty);
            true
        }
        None => false,
    }
}
