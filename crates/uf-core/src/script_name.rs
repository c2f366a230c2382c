//! Strongly-typed script name wrapper.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Strongly-typed wrapper for migration script names.
///
/// A script name is the unique identity of a script across discovery, the
/// journal, and reporting. For filesystem sources it is the path relative to
/// the script root, always `/`-separated, e.g.
/// `tables/000001-create-person.sql`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptName(String);

impl ScriptName {
    /// Create a new `ScriptName`, panicking in debug builds if the name is empty.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
    pub fn new(name: impl Into<String>) -> Self {
        let s = name.into();
        debug_assert!(!s.is_empty(), "ScriptName must not be empty");
        Self(s)
    }

    /// Try to create a new `ScriptName`, returning `None` if the name is empty.
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let s = name.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ScriptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScriptName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ScriptName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ScriptName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScriptName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for ScriptName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ScriptName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_empty() {
        assert!(ScriptName::try_new("").is_none());
        assert!(ScriptName::try_new("a.sql").is_some());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = ScriptName::new("000001-a.sql");
        let b = ScriptName::new("000002-b.sql");
        assert!(a < b);
    }

    #[test]
    fn test_display_and_as_str() {
        let name = ScriptName::new("views/orders.sql");
        assert_eq!(name.to_string(), "views/orders.sql");
        assert_eq!(name.as_str(), "views/orders.sql");
        assert_eq!(name, "views/orders.sql");
    }
}
