//! Snapshot, restore, and rollback across a store's lifetime

use normstore::{EntityStore, Id, Record, StoreConfig, Validation};

fn guarded() -> EntityStore {
    EntityStore::with_config(StoreConfig::new().with_name("guarded").with_validate_entity(
        |r: &Record| {
            if r.contains("name") {
                Validation::Valid
            } else {
                Validation::Rejected("name is required".to_string())
            }
        },
    ))
}

#[test]
fn restore_brings_back_selection_state() {
    let mut store = EntityStore::new();
    store.actions().create_one(Record::new(1).with("name", "a")).unwrap();
    store.actions().set_current_by_id(1);
    store.actions().set_active(1);
    let before = store.snapshot();

    store.actions().delete_one(1);
    assert!(store.getters().get_current_by_id().is_none());

    store.restore(before);
    assert_eq!(store.getters().get_current_by_id().map(|e| e.id().clone()), Some(Id::from(1)));
    assert!(store.getters().is_already_active(1));
}

#[test]
fn rollback_discards_partial_batch() {
    let mut store = guarded();

    let err = store
        .with_rollback(|actions| {
            actions.create_many(vec![
                Record::new(1).with("name", "ok"),
                Record::new(2),
                Record::new(3).with("name", "never"),
            ])
        })
        .unwrap_err();

    assert_eq!(err.reason(), Some("name is required"));
    assert!(store.getters().get_is_empty());
}

#[test]
fn without_rollback_partial_batch_is_kept() {
    let mut store = guarded();

    let result = store.actions().create_many(vec![
        Record::new(1).with("name", "ok"),
        Record::new(2),
    ]);

    assert!(result.is_err());
    assert_eq!(store.getters().get_all_ids(), vec![Id::from(1)]);
}

#[test]
fn reset_keeps_configuration() {
    let mut store = guarded();
    store.actions().create_one(Record::new(1).with("name", "x")).unwrap();

    store.reset();

    assert!(store.getters().get_is_empty());
    assert_eq!(store.name(), "guarded");
    assert!(store.actions().create_one(Record::new(2)).is_err());
}
