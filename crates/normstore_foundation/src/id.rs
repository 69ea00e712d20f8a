//! Entity identifiers.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a stored entity: either an integer or a string.
///
/// Integer and string ids never compare equal, so `Id::Int(1)` and
/// `Id::Str("1")` address different entities.
///
/// # Ordering
/// Every `Int` sorts before every `Str`. Integers compare numerically and
/// strings lexicographically. This is the iteration order of [`IdMap`].
///
/// [`IdMap`]: crate::IdMap
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Id {
    /// Integer identifier.
    Int(i64),
    /// String identifier.
    Str(Arc<str>),
}

impl Id {
    /// Returns the integer value, if this is an integer id.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    /// Returns the string value, if this is a string id.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "Id({n})"),
            Self::Str(s) => write!(f, "Id({s:?})"),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Id {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u32> for Id {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<&Id> for Id {
    fn from(id: &Id) -> Self {
        id.clone()
    }
}
