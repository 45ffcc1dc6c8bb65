//! FILENAME: core/table-engine/src/styling.rs
//! Conditional class maps.
//!
//! Views describe row and cell presentation as `{ "table-danger": bool, ... }`.
//! The overlay turns that into the list of classes whose flag is set. It is
//! evaluated once per row/cell and knows nothing about rendering.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Class name -> enabled, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMap {
    entries: Vec<(String, bool)>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `insert`.
    pub fn set(mut self, class: impl Into<String>, enabled: bool) -> Self {
        self.insert(class, enabled);
        self
    }

    /// Sets a flag. A repeated class keeps its first position and takes the
    /// latest flag.
    pub fn insert(&mut self, class: impl Into<String>, enabled: bool) {
        let class = class.into();
        match self.entries.iter_mut().find(|(name, _)| *name == class) {
            Some(entry) => entry.1 = enabled,
            None => self.entries.push((class, enabled)),
        }
    }

    pub fn get(&self, class: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, enabled)| *enabled)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(name, enabled)| (name.as_str(), *enabled))
    }

    /// Names whose flag is true.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, enabled)| *enabled).map(|(name, _)| name)
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for ClassMap {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut map = ClassMap::new();
        for (class, enabled) in iter {
            map.insert(class, enabled);
        }
        map
    }
}

/// Final class list for a row or cell. `None` and empty maps yield nothing.
/// Every true entry applies; keeping related flags exclusive is up to the
/// view.
pub fn resolve(classes: Option<&ClassMap>) -> Vec<String> {
    classes
        .map(|map| map.enabled().map(str::to_string).collect())
        .unwrap_or_default()
}

// ============================================================================
// SERDE (as a JSON object, keeping document order)
// ============================================================================

impl Serialize for ClassMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (class, enabled) in &self.entries {
            map.serialize_entry(class, enabled)?;
        }
        map.end()
    }
}

struct ClassMapVisitor;

impl<'de> Visitor<'de> for ClassMapVisitor {
    type Value = ClassMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of class names to booleans")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ClassMap, A::Error> {
        let mut map = ClassMap::new();
        while let Some((class, enabled)) = access.next_entry::<String, bool>()? {
            map.insert(class, enabled);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for ClassMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ClassMapVisitor)
    }
}
