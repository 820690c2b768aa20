//! Preference model: a flat map of named keys to primitive values,
//! plus the immutable snapshot the UI renders.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// A primitive value stored under a preference key.
///
/// Serialized untagged, so the on-disk document is a plain JSON object:
/// `{"counter_key": 3, "dark_theme": false}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
}

/// A typed, named preference key.
pub struct Key<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

/// Conversion between a Rust primitive and its stored representation.
pub trait PrefPrimitive: Sized {
    fn into_value(self) -> PrefValue;
    fn from_value(value: &PrefValue) -> Option<Self>;
}

impl PrefPrimitive for i64 {
    fn into_value(self) -> PrefValue {
        PrefValue::Int(self)
    }

    fn from_value(value: &PrefValue) -> Option<Self> {
        match value {
            PrefValue::Int(v) => Some(*v),
            PrefValue::Bool(_) => None,
        }
    }
}

impl PrefPrimitive for bool {
    fn into_value(self) -> PrefValue {
        PrefValue::Bool(self)
    }

    fn from_value(value: &PrefValue) -> Option<Self> {
        match value {
            PrefValue::Bool(v) => Some(*v),
            PrefValue::Int(_) => None,
        }
    }
}

/// The counter incremented by the Update button.
pub const COUNTER: Key<i64> = Key::new("counter_key");

/// The theme flag; absent reads as `false`.
pub const DARK_THEME: Key<bool> = Key::new("dark_theme");

/// The full persisted preference map. Key uniqueness comes from the map;
/// a whole-map replace is the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences {
    entries: BTreeMap<String, PrefValue>,
}

impl Preferences {
    pub fn get<T: PrefPrimitive>(&self, key: Key<T>) -> Option<T> {
        self.entries.get(key.name()).and_then(T::from_value)
    }

    pub fn set<T: PrefPrimitive>(&mut self, key: Key<T>, value: T) {
        self.entries.insert(key.name().to_owned(), value.into_value());
    }

    pub fn remove<T>(&mut self, key: Key<T>) -> Option<PrefValue> {
        self.entries.remove(key.name())
    }

    /// Empty the map. The storage file itself is left in place.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Immutable projection of the preference map for the main screen.
/// Recomputed from every published snapshot; missing keys default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub counter: i64,
    pub dark_theme: bool,
}

impl UiState {
    pub fn from_prefs(prefs: &Preferences) -> Self {
        Self {
            counter: prefs.get(COUNTER).unwrap_or(0),
            dark_theme: prefs.get(DARK_THEME).unwrap_or(false),
        }
    }
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "counter = {}, dark_theme = {}",
            self.counter, self.dark_theme
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_project_to_defaults() {
        let prefs = Preferences::default();
        let state = UiState::from_prefs(&prefs);
        assert_eq!(state.counter, 0);
        assert!(!state.dark_theme);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let mut prefs = Preferences::default();
        prefs.set(COUNTER, 7);
        prefs.set(DARK_THEME, true);
        assert_eq!(prefs.get(COUNTER), Some(7));
        assert_eq!(prefs.get(DARK_THEME), Some(true));
        assert_eq!(prefs.len(), 2);
    }

    #[test]
    fn wrong_type_reads_as_none() {
        let mut prefs = Preferences::default();
        prefs.set(COUNTER, 3);
        // Same name, different type.
        let as_bool: Key<bool> = Key::new("counter_key");
        assert_eq!(prefs.get(as_bool), None);
    }

    #[test]
    fn remove_deletes_a_single_key() {
        let mut prefs = Preferences::default();
        prefs.set(COUNTER, 9);
        prefs.set(DARK_THEME, true);

        assert_eq!(prefs.remove(COUNTER), Some(PrefValue::Int(9)));
        assert_eq!(prefs.get(COUNTER), None);
        assert_eq!(prefs.get(DARK_THEME), Some(true));
        assert_eq!(prefs.remove(COUNTER), None);
    }

    #[test]
    fn clear_empties_the_map() {
        let mut prefs = Preferences::default();
        prefs.set(COUNTER, 1);
        prefs.set(DARK_THEME, false);
        prefs.clear();
        assert!(prefs.is_empty());
        assert_eq!(UiState::from_prefs(&prefs).counter, 0);
    }

    #[test]
    fn serializes_as_a_plain_json_object() {
        let mut prefs = Preferences::default();
        prefs.set(COUNTER, 42);
        prefs.set(DARK_THEME, false);

        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"counter_key":42,"dark_theme":false}"#);

        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }
}
