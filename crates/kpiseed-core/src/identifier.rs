//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type used for object aliases and class
//! names. Aliases are compared and hashed on every step of dependency
//! resolution, so they are interned once and handled as `Copy` symbols.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use kpiseed_core::identifier::Id;
///
/// let city = Id::new("differdange");
/// let class = Id::new("City");
///
/// assert_eq!(city, "differdange");
/// assert_ne!(city, class);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns `true` if the identifier is empty or whitespace only.
    ///
    /// # Examples
    ///
    /// ```
    /// use kpiseed_core::identifier::Id;
    ///
    /// assert!(Id::new("  ").is_blank());
    /// assert!(!Id::new("kpi").is_blank());
    /// ```
    pub fn is_blank(&self) -> bool {
        self.with_str(|s| s.trim().is_empty())
    }

    fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Copy out before writing so the interner lock is not held across the formatter.
        let value = self.with_str(str::to_owned);
        f.write_str(&value)
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        self.with_str(|s| s == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.with_str(|s| serializer.serialize_str(s))
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("City");
        let id2 = Id::new("City");
        let id3 = Id::new("KPI");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "City");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("kpiTemp_Differdange");
        assert_eq!(format!("{}", id), "kpiTemp_Differdange");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "torino".into();
        let id2 = Id::new("torino");

        assert_eq!(id1, id2);
        assert_eq!(id1, "torino");
    }

    #[test]
    fn test_from_str() {
        let id: Id = "cascais".parse().unwrap();
        assert_eq!(id, Id::new("cascais"));
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("Dashboard");

        assert!(id == "Dashboard");
        assert!(id != "dashboard");

        let empty = Id::new("");
        assert!(empty == "");
        assert!(empty != "non-empty");
    }

    #[test]
    fn test_is_blank() {
        assert!(Id::new("").is_blank());
        assert!(Id::new(" \t").is_blank());
        assert!(!Id::new(" a ").is_blank());
    }
}
