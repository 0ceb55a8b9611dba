//! Stage and node identifiers backed by a global string interner.
//!
//! Stage ids arrive as strings from catalogs and persisted pipelines and are
//! compared constantly while editing and laying out a chain, so they are
//! interned once and handled as a `Copy` symbol afterwards.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned identifier for stages and render nodes.
///
/// # Examples
///
/// ```
/// use stagegraph_core::identifier::Id;
///
/// let stage = Id::new("route-by-topic");
/// assert_eq!(stage, "route-by-topic");
///
/// let node = Id::new("transform_group").create_nested(stage);
/// assert_eq!(node, "transform_group::route-by-topic");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its string form.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates a nested ID by joining this ID and `child_id` with `::`.
    ///
    /// Used for render node ids that must not collide with user-chosen
    /// stage ids, e.g. `transform_group::<stage id>`.
    pub fn create_nested(&self, child_id: Id) -> Self {
        let mut interner = interner();
        let parent_str = interner
            .resolve(self.0)
            .expect("Parent ID should exist in interner");
        let child_str = interner
            .resolve(child_id.0)
            .expect("Child ID should exist in interner");
        let nested_name = format!("{parent_str}::{child_str}");
        Self(interner.get_or_intern(&nested_name))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f.write_str(str_value)
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(Id::new("orders"), Id::new("orders"));
        assert_ne!(Id::new("orders"), Id::new("customers"));
    }

    #[test]
    fn test_display_round_trip() {
        let id = Id::new("pg-source");
        assert_eq!(id.to_string(), "pg-source");

        let parsed: Id = "pg-source".parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_create_nested() {
        let nested = Id::new("transform_group").create_nested(Id::new("t1"));
        assert_eq!(nested, "transform_group::t1");
        assert_ne!(nested, Id::new("t1"));
    }

    #[test]
    fn test_str_comparison() {
        let id = Id::new("destination");
        assert!(id == "destination");
        assert!(id != "source");
    }

    #[test]
    fn test_serde_as_string() {
        let id = Id::new("kafka-sink");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"kafka-sink\"");

        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
