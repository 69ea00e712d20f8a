//! Core types, values, and persistent collections for normstore.
//!
//! This crate provides:
//! - [`Id`] - Integer-or-string entity identifiers
//! - [`Value`] - Opaque payload values for entity fields
//! - [`Record`] - An entity: an id plus named fields
//! - [`Error`] - Error types with context
//! - Persistent id-keyed collections ([`IdMap`], [`IdList`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod id;
pub mod record;
pub mod value;

pub use collections::{IdList, IdMap};
pub use error::{Error, ErrorContext, ErrorKind};
pub use id::Id;
pub use record::{ID_FIELD, Record};
pub use value::Value;

/// Result type alias using normstore's Error.
pub type Result<T> = std::result::Result<T, Error>;
