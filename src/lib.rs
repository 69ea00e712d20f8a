//! normstore - normalized entity storage
//!
//! This crate re-exports all layers of the normstore system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: normstore_store      — Actions, getters, hooks, EntityStore facade
//! Layer 1: normstore_state      — byId/allIds state, selection slots, mutators
//! Layer 0: normstore_foundation — Core types (Id, Value, Record, Error)
//! ```

pub use normstore_foundation as foundation;
pub use normstore_state as state;
pub use normstore_store as store;

pub use normstore_foundation::{Error, ErrorKind, Id, Record, Result, Value};
pub use normstore_state::{State, StoredEntity};
pub use normstore_store::{Actions, EntityStore, Filter, Getters, StoreConfig, Validation};
