//! Integration tests for the query API

use normstore_foundation::{Id, Record, Value};
use normstore_state::StoredEntity;
use normstore_store::EntityStore;

fn people() -> EntityStore {
    let mut store = EntityStore::new();
    store
        .actions()
        .create_many(vec![
            Record::new(3).with("name", "Carol").with("age", 41),
            Record::new(1).with("name", "Alice").with("age", 17),
            Record::new(2).with("name", "Bob").with("age", 25),
        ])
        .unwrap();
    store
}

fn age(entity: &StoredEntity) -> i64 {
    entity.get("age").and_then(Value::as_int).unwrap_or_default()
}

fn ids(entities: &[&StoredEntity]) -> Vec<Id> {
    entities.iter().map(|e| e.id().clone()).collect()
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn get_many_preserves_argument_order() {
    let store = people();
    let found = store.getters().get_many([2, 9, 1]);
    assert_eq!(ids(&found), vec![Id::from(2), Id::from(1)]);
}

#[test]
fn find_aliases_match_get() {
    let store = people();
    let getters = store.getters();

    assert_eq!(getters.find_one_by_id(1), getters.get_one(1));
    assert_eq!(getters.find_many_by_id([3, 1]), getters.get_many([3, 1]));
}

#[test]
fn get_all_array_is_id_ordered() {
    let store = people();
    let all = store.getters().get_all_array();

    assert_eq!(ids(&all), vec![Id::from(1), Id::from(2), Id::from(3)]);
    assert_eq!(store.getters().get_all_ids(), vec![Id::from(3), Id::from(1), Id::from(2)]);
}

// =============================================================================
// Missing
// =============================================================================

#[test]
fn missing_ids_collapse_duplicates_by_default() {
    let store = people();
    let getters = store.getters();

    assert_eq!(getters.get_missing_ids([4, 1, 4, 5], false), vec![Id::from(4), Id::from(5)]);
    assert_eq!(
        getters.get_missing_ids([4, 1, 4, 5], true),
        vec![Id::from(4), Id::from(4), Id::from(5)]
    );
}

#[test]
fn missing_entities_filters_known_records() {
    let store = people();
    let incoming = vec![Record::new(2), Record::new(7).with("name", "Grace")];

    let missing = store.getters().get_missing_entities(&incoming);

    assert_eq!(missing, vec![&incoming[1]]);
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn get_where_filters_into_map() {
    let store = people();
    let adults = store
        .getters()
        .get_where(Some(&|e: &StoredEntity| age(e) >= 18));

    assert_eq!(adults.len(), 2);
    assert!(adults.contains_key(&Id::from(2)));
    assert!(adults.contains_key(&Id::from(3)));
}

#[test]
fn missing_filter_selects_everything() {
    let store = people();
    let getters = store.getters();

    assert_eq!(getters.get_where(None).len(), 3);
    assert_eq!(getters.get_where_array(None).len(), 3);
    assert_eq!(getters.get_first_where(None).map(|e| e.id().clone()), Some(Id::from(1)));
}

#[test]
fn get_first_where_returns_lowest_matching_id() {
    let store = people();
    let first = store
        .getters()
        .get_first_where(Some(&|e: &StoredEntity| age(e) > 20));

    assert_eq!(first.map(|e| e.id().clone()), Some(Id::from(2)));
}

#[test]
fn get_first_where_on_empty_store() {
    let store = EntityStore::new();
    assert!(store.getters().get_first_where(None).is_none());
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn search_is_case_insensitive() {
    let store = people();
    let found = store.getters().search("ALI");
    assert_eq!(ids(&found), vec![Id::from(1)]);
}

#[test]
fn search_matches_string_ids() {
    let mut store = EntityStore::new();
    store
        .actions()
        .create_one(Record::new("order-17").with("total", 10))
        .unwrap();

    assert_eq!(store.getters().search("order").len(), 1);
    assert!(store.getters().search("10").is_empty());
}

#[test]
fn empty_search_matches_entities_with_strings() {
    let store = people();
    assert_eq!(store.getters().search("").len(), 3);
}
