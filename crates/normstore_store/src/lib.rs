//! Actions, getters, and the entity store facade for normstore.
//!
//! This crate provides:
//! - [`StoreConfig`] - Validation and lifecycle hooks, always present
//! - [`Actions`] - The write API (create/update/delete, selection, dirty flags)
//! - [`Getters`] - Read-only queries over the state
//! - [`EntityStore`] - Owns one state and one configuration
//!
//! # Example
//!
//! ```
//! use normstore_foundation::{Id, Record};
//! use normstore_store::EntityStore;
//!
//! let mut store = EntityStore::new();
//! store
//!     .actions()
//!     .create_many((1..=3).map(|id| Record::new(id).with("name", "x")))
//!     .unwrap();
//! store.actions().delete_one(2);
//!
//! assert_eq!(store.getters().get_all_ids(), vec![Id::from(1), Id::from(3)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actions;
pub mod config;
pub mod getters;
pub mod store;

pub use actions::Actions;
pub use config::{DEFAULT_STORE_NAME, StoreConfig, Validation};
pub use getters::{Filter, Getters};
pub use store::EntityStore;
