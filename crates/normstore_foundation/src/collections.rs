//! Persistent id-keyed collections with structural sharing.
//!
//! These are thin wrappers around the `im` crate's persistent data structures.
//! Cloning either collection is O(1), which is what makes whole-state
//! snapshots cheap.

use std::fmt;
use std::iter::FromIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::id::Id;

/// Persistent map from [`Id`] to `V`.
///
/// Iteration order is the [`Id`] order (integers ascending, then strings),
/// independent of insertion order.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(
    serialize = "V: Serialize + Clone",
    deserialize = "V: Deserialize<'de> + Clone"
)))]
pub struct IdMap<V: Clone>(im::OrdMap<Id, V>);

impl<V: Clone> Default for IdMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> IdMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self(im::OrdMap::new())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a value by id.
    #[must_use]
    pub fn get(&self, id: &Id) -> Option<&V> {
        self.0.get(id)
    }

    /// Gets a mutable reference to a value by id.
    pub fn get_mut(&mut self, id: &Id) -> Option<&mut V> {
        self.0.get_mut(id)
    }

    /// Returns true if the map has an entry for `id`.
    #[must_use]
    pub fn contains_key(&self, id: &Id) -> bool {
        self.0.contains_key(id)
    }

    /// Inserts a value, returning the previous value at that id.
    pub fn insert(&mut self, id: Id, value: V) -> Option<V> {
        self.0.insert(id, value)
    }

    /// Removes a value, returning it if it was present.
    pub fn remove(&mut self, id: &Id) -> Option<V> {
        self.0.remove(id)
    }

    /// Returns an iterator over id/value pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&Id, &V)> {
        self.0.iter()
    }

    /// Returns an iterator over the ids in id order.
    pub fn keys(&self) -> impl Iterator<Item = &Id> {
        self.0.keys()
    }

    /// Returns an iterator over the values in id order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.values()
    }
}

impl<V: Clone + fmt::Debug> fmt::Debug for IdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: Clone + PartialEq> PartialEq for IdMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<V: Clone + Eq> Eq for IdMap<V> {}

impl<V: Clone> FromIterator<(Id, V)> for IdMap<V> {
    fn from_iter<I: IntoIterator<Item = (Id, V)>>(iter: I) -> Self {
        Self(im::OrdMap::from_iter(iter))
    }
}

impl<'a, V: Clone> IntoIterator for &'a IdMap<V> {
    type Item = (&'a Id, &'a V);
    type IntoIter = im::ordmap::Iter<'a, Id, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Persistent ordered sequence of ids with set semantics.
///
/// Order is insertion order. [`IdList::push_unique`] never introduces a
/// duplicate, so the list doubles as an insertion-ordered set. It encodes
/// as a plain sequence; decoding drops repeats like [`FromIterator`] does.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Id>", into = "Vec<Id>"))]
pub struct IdList(im::Vector<Id>);

impl IdList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self(im::Vector::new())
    }

    /// Returns the number of ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the list contains `id`.
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.0.contains(id)
    }

    /// Appends `id` unless it is already present.
    ///
    /// Returns true if the id was appended.
    pub fn push_unique(&mut self, id: Id) -> bool {
        if self.0.contains(&id) {
            return false;
        }
        self.0.push_back(id);
        true
    }

    /// Appends `id` without checking for a duplicate.
    ///
    /// The caller must already know `id` is absent, e.g. from an index
    /// lookup that is cheaper than the linear scan [`IdList::push_unique`]
    /// does.
    pub fn push_back(&mut self, id: Id) {
        self.0.push_back(id);
    }

    /// Removes every occurrence of `id`, preserving the order of the rest.
    ///
    /// Returns true if anything was removed.
    pub fn remove(&mut self, id: &Id) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != id);
        self.0.len() != before
    }

    /// Removes all ids.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the oldest id.
    #[must_use]
    pub fn first(&self) -> Option<&Id> {
        self.0.front()
    }

    /// Returns an iterator over the ids in order.
    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.0.iter()
    }

    /// Copies the ids into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Id> {
        self.0.iter().cloned().collect()
    }
}

impl fmt::Debug for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Id> for IdList {
    /// Collects ids, dropping repeats after their first occurrence.
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        let mut list = Self::new();
        for id in iter {
            list.push_unique(id);
        }
        list
    }
}

impl From<Vec<Id>> for IdList {
    fn from(ids: Vec<Id>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<IdList> for Vec<Id> {
    fn from(list: IdList) -> Self {
        list.0.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a IdList {
    type Item = &'a Id;
    type IntoIter = im::vector::Iter<'a, Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl PartialEq<[Id]> for IdList {
    fn eq(&self, other: &[Id]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl PartialEq<Vec<Id>> for IdList {
    fn eq(&self, other: &Vec<Id>) -> bool {
        self == other.as_slice()
    }
}
