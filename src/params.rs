//! Insertion-ordered parameter maps.
//!
//! Matching and building both traffic in small key/value collections: a
//! handful of path variables, route defaults, and the occasional extra query
//! argument. `ParamMap` keeps those in a stack-allocated vector instead of a
//! `HashMap` so the common case never touches the heap and iteration order is
//! always the order the caller inserted keys in. That ordering is load-bearing:
//! leftover build parameters are serialized into the query string in exactly
//! this order.

use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of parameters before heap allocation.
/// Most route templates have ≤4 variables plus a few defaults.
pub const MAX_INLINE_PARAMS: usize = 8;

type Entries = SmallVec<[(Arc<str>, Value); MAX_INLINE_PARAMS]>;

/// An ordered map from parameter name to value.
///
/// Keys are `Arc<str>` because variable names come from the compiled route
/// table and are shared, not copied, into every match result. Values are
/// [`serde_json::Value`] so non-string defaults survive matching unchanged
/// and numeric build arguments are accepted as-is.
///
/// Inserting an existing key replaces its value in place, keeping the key's
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Entries,
}

impl ParamMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a value, replacing in place if the key already exists.
    pub fn insert(&mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Get a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Get a value by name as a string slice, if it is a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// True if the key is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.as_ref() == name)
    }

    /// Remove and return a value by name.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k.as_ref() == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for ParamMap
where
    K: Into<Arc<str>>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParamMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for ParamMap {
    type Item = (Arc<str>, Value);
    type IntoIter = smallvec::IntoIter<[(Arc<str>, Value); MAX_INLINE_PARAMS]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
