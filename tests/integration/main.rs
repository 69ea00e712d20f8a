//! Cross-layer integration tests
//!
//! End-to-end scenarios driven through the `normstore` facade.

mod snapshots;
