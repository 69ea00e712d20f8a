//! Integration tests for validation and lifecycle hooks

use std::sync::{Arc, Mutex};

use normstore_foundation::{Id, Record, Value};
use normstore_state::StoredEntity;
use normstore_store::{EntityStore, StoreConfig, Validation};

type Log = Arc<Mutex<Vec<String>>>;

fn logging_store(log: &Log) -> EntityStore {
    let created = Arc::clone(log);
    let updated = Arc::clone(log);
    let deleted = Arc::clone(log);
    EntityStore::with_config(
        StoreConfig::new()
            .with_name("audited")
            .with_on_entity_created(move |r: &Record| {
                created.lock().unwrap().push(format!("created {}", r.id()));
            })
            .with_on_entity_updated(move |patch: &Record, previous: &StoredEntity| {
                updated
                    .lock()
                    .unwrap()
                    .push(format!("updated {} ({} fields)", patch.id(), previous.record().len()));
            })
            .with_on_entity_deleted(move |e: &StoredEntity| {
                deleted.lock().unwrap().push(format!("deleted {}", e.id()));
            }),
    )
}

#[test]
fn hooks_fire_in_operation_order() {
    let log = Log::default();
    let mut store = logging_store(&log);
    {
        let mut actions = store.actions();
        actions.create_one(Record::new(1).with("a", 1)).unwrap();
        actions.update_one(1, Record::new(1).with("b", 2)).unwrap();
        actions.delete_one(1);
        actions.delete_one(1);
    }

    assert_eq!(
        *log.lock().unwrap(),
        vec!["created 1", "updated 1 (1 fields)", "deleted 1"]
    );
}

#[test]
fn update_fallback_fires_created_hook() {
    let log = Log::default();
    let mut store = logging_store(&log);
    store
        .actions()
        .update_one(5, Record::new(5).with("x", 1))
        .unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["created 5"]);
    assert!(!store.getters().is_dirty(5));
}

#[test]
fn rejected_entities_fire_no_hooks() {
    let log = Log::default();
    let hooked = Arc::clone(&log);
    let mut store = EntityStore::with_config(
        StoreConfig::new()
            .with_validate_entity(|r: &Record| r.contains("email"))
            .with_on_entity_created(move |r: &Record| {
                hooked.lock().unwrap().push(r.id().to_string());
            }),
    );

    assert!(store.actions().create_one(Record::new(1)).is_err());
    assert!(log.lock().unwrap().is_empty());
    assert!(store.getters().get_is_empty());
}

#[test]
fn validator_reason_reaches_error() {
    let mut store = EntityStore::with_config(StoreConfig::new().with_validate_entity(
        |r: &Record| -> Validation {
            match r.get("age").and_then(Value::as_int) {
                Some(age) if age >= 18 => Validation::Valid,
                _ => Validation::Rejected("must be an adult".into()),
            }
        },
    ));

    let err = store
        .actions()
        .create_one(Record::new(1).with("age", 12))
        .unwrap_err();

    assert!(err.is_validation_failure());
    assert_eq!(err.reason(), Some("must be an adult"));
}

#[test]
fn batch_error_reports_index() {
    let mut store = EntityStore::with_config(
        StoreConfig::new().with_validate_entity(|r: &Record| r.id() != &Id::from(3)),
    );

    let err = store
        .actions()
        .create_many((1..=5).map(Record::new))
        .unwrap_err();

    let context = err.context.unwrap();
    assert_eq!(context.operation.as_deref(), Some("create_many"));
    assert_eq!(context.index, Some(2));
    assert_eq!(store.getters().get_all_ids(), vec![Id::from(1), Id::from(2)]);
}

#[test]
fn reserved_hooks_are_reachable() {
    let mut config = StoreConfig::new()
        .with_custom_dirty_check(|e: &StoredEntity| e.get("changed").is_some())
        .with_generate_id(|| Id::from("fixed"));

    assert_eq!(config.next_id(), Id::from("fixed"));
    assert!(config.is_custom_dirty(&StoredEntity::clean(Record::new(1).with("changed", true))));
    assert!(!config.is_custom_dirty(&StoredEntity::clean(Record::new(1))));
}

#[test]
fn default_id_generator_counts_up() {
    let mut config = StoreConfig::new();
    assert_eq!(config.next_id(), Id::from(1));
    assert_eq!(config.next_id(), Id::from(2));
}
