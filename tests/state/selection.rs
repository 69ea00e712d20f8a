//! Integration tests for the selection slots
//!
//! Covers `current`, `current_by_id`, and the `active` list.

use normstore_foundation::{Id, Record};
use normstore_state::{State, StoredEntity, add_entity_to_state};

fn seeded() -> State {
    let mut state = State::new();
    for id in 1..=3 {
        add_entity_to_state(&mut state, StoredEntity::clean(Record::new(id)));
    }
    state
}

#[test]
fn current_is_independent_of_index() {
    let mut state = State::new();
    state.set_current(Record::new(42).with("draft", true));

    assert_eq!(state.current().map(StoredEntity::id), Some(&Id::from(42)));
    assert!(!state.current().unwrap().is_dirty());
    assert!(state.is_empty());

    assert!(state.take_current().is_some());
    assert!(state.current().is_none());
}

#[test]
fn select_requires_presence() {
    let mut state = seeded();

    assert!(!state.select_by_id(&Id::from(9)));
    assert_eq!(state.current_by_id(), None);
    assert!(state.select_by_id(&Id::from(2)));
    assert_eq!(state.current_by_id(), Some(&Id::from(2)));

    state.clear_current_by_id();
    assert_eq!(state.current_by_id(), None);
}

#[test]
fn active_deduplicates() {
    let mut state = seeded();

    assert!(state.activate(Id::from(1)));
    assert!(!state.activate(Id::from(1)));
    assert!(state.activate(Id::from(3)));
    assert_eq!(state.active().to_vec(), vec![Id::from(1), Id::from(3)]);

    state.clear_active();
    assert!(state.active().is_empty());
}

#[test]
fn release_selection_clears_every_slot() {
    let mut state = seeded();
    state.set_current(Record::new(2));
    state.select_by_id(&Id::from(2));
    state.activate(Id::from(2));
    state.activate(Id::from(3));

    state.release_selection(&Id::from(2));

    assert!(state.current().is_none());
    assert!(state.current_by_id().is_none());
    assert_eq!(state.active().to_vec(), vec![Id::from(3)]);
}

#[test]
fn release_selection_leaves_other_ids_alone() {
    let mut state = seeded();
    state.set_current(Record::new(1));
    state.select_by_id(&Id::from(1));

    state.release_selection(&Id::from(2));

    assert!(state.current().is_some());
    assert_eq!(state.current_by_id(), Some(&Id::from(1)));
}
