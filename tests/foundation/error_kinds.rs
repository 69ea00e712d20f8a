//! Integration tests for error types

use normstore_foundation::{Error, ErrorContext, ErrorKind, Id};

#[test]
fn validation_failure_display() {
    let err = Error::validation_failed(Id::from(1), None);
    assert!(matches!(err.kind, ErrorKind::ValidationFailed { .. }));
    assert_eq!(format!("{err}"), "entity validation failed");
}

#[test]
fn validation_failure_with_reason_display() {
    let err = Error::validation_failed(Id::from(1), Some("age must be >= 18".to_string()));
    assert_eq!(format!("{err}"), "entity validation failed: age must be >= 18");
    assert_eq!(err.reason(), Some("age must be >= 18"));
}

#[test]
fn context_display_without_index() {
    let ctx = ErrorContext::new().with_operation("create_one");
    assert_eq!(format!("{ctx}"), "in create_one");
}

#[test]
fn context_display_store_only() {
    let ctx = ErrorContext::new().with_store("users");
    assert_eq!(format!("{ctx}"), "on store users");
}
