//! Normalized entity state and its mutators for normstore.
//!
//! This crate provides:
//! - [`State`] - The `by_id`/`all_ids` index plus selection slots
//! - [`StoredEntity`] - A record with the store-owned dirty flag
//! - [`mutators`] - Primitive edits that keep `by_id` and `all_ids` in sync

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod mutators;
pub mod state;

pub use mutators::{
    add_entity_to_state, remove_entity_from_state, set_entity_dirty, update_entity_in_state,
};
pub use state::{State, StoredEntity};
