//! Entity records: an id plus named payload fields.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::error::Error;
use crate::id::Id;
use crate::value::Value;

/// Field name reserved for the entity id.
///
/// The id lives outside the field map, so no record may carry a field with
/// this name. [`Record::set`] refuses it and decoding rejects it.
pub const ID_FIELD: &str = "id";

/// A caller-defined entity.
///
/// The store only cares about the [`Id`]; every other field is opaque
/// payload. Fields are kept in name order. The id is not a field and
/// cannot be changed by [`Record::set`] or [`Record::merge`].
///
/// A `Record` is also the patch type for updates: a patch is a record
/// holding just the fields to overwrite.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRecord"))]
pub struct Record {
    id: Id,
    fields: im::OrdMap<Arc<str>, Value>,
}

impl Record {
    /// Creates a record with no fields.
    #[must_use]
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            fields: im::OrdMap::new(),
        }
    }

    /// Builder method to set a field.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns the record's id.
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Gets a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Sets a field, returning the previous value.
    ///
    /// Setting [`ID_FIELD`] is ignored and returns `None`: a record's id is
    /// fixed at construction.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Option<Value> {
        if field == ID_FIELD {
            return None;
        }
        self.fields.insert(Arc::from(field), value.into())
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Returns true if the record has a field with this name.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the number of fields (the id is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over field names and values in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (&**k, v))
    }

    /// Shallow-merges `patch` into this record, key by key.
    ///
    /// Every field in `patch` overwrites the field of the same name here.
    /// Fields absent from `patch` are left alone. The patch's id is ignored.
    pub fn merge(&mut self, patch: &Record) {
        for (field, value) in &patch.fields {
            self.fields.insert(Arc::clone(field), value.clone());
        }
    }

    /// Returns every top-level string in the record.
    ///
    /// A string id comes first, followed by each [`Value::String`] field in
    /// name order. Strings nested inside lists or maps are not included.
    pub fn string_values(&self) -> impl Iterator<Item = &str> {
        self.id
            .as_str()
            .into_iter()
            .chain(self.fields.values().filter_map(Value::as_str))
    }
}

/// Wire shape of a [`Record`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawRecord {
    id: Id,
    fields: im::OrdMap<Arc<str>, Value>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRecord> for Record {
    type Error = Error;

    fn try_from(raw: RawRecord) -> Result<Self, Error> {
        if raw.fields.contains_key(ID_FIELD) {
            return Err(Error::reserved_field(ID_FIELD));
        }
        Ok(Self {
            id: raw.id,
            fields: raw.fields,
        })
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Record");
        s.field("id", &self.id);
        for (name, value) in &self.fields {
            s.field(name, value);
        }
        s.finish()
    }
}
