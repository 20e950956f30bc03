//! Option-sets
//!
//!     An option-set is the `{ key[=value] ; ... }` block carried by directive commands. It is an
//!     ordered map: iteration follows insertion order, which is what makes regeneration
//!     faithful. Overwriting a key keeps the key where it was.
//!
//! Syntax
//!
//!     "{" <expr> (";" <expr>)* ";"? "}"
//!
//!     Examples:
//!         {k=1;gamma=0.5;lambda=-1.57}
//!         {rcut=2.4; pad=0.5; build_contacts}

use super::value::Value;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OptionSet {
    entries: Vec<(String, Value)>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, overwriting in place when present and appending otherwise.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [OptionSet::insert].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Union with `other`; entries of `other` win, keys already present keep their position.
    pub fn merged(&self, other: &OptionSet) -> OptionSet {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            merged.insert(key, value.clone());
        }
        merged
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for OptionSet
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = OptionSet::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

/// Renders the block form, e.g. `{k=1;gamma=0.5;build_contacts}`.
impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            match value {
                Value::Flag => f.write_str(key)?,
                _ => write!(f, "{}={}", key, value)?,
            }
        }
        f.write_str("}")
    }
}

impl Serialize for OptionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
