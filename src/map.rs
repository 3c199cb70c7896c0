//! Ordered map type for TTP controls.
//!
//! [`TtpMap`] wraps an [`IndexMap`] so a control serializes its children in
//! the order they were inserted (or received). Key order carries no meaning
//! on the wire; keeping it stable only makes output reproducible. Equality
//! ignores order.
//!
//! ## Examples
//!
//! ```rust
//! use tesira_ttp::{TtpMap, TtpValue};
//!
//! let mut map = TtpMap::new();
//! map.insert("instanceTag".to_string(), TtpValue::from("Level1"));
//! map.insert("channel".to_string(), TtpValue::from(1));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(TtpValue::Control(map).to_wire(), "{\"instanceTag\":\"Level1\" \"channel\":1}");
//! ```

use crate::{Error, Result, TtpValue};
use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of keys to TTP values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TtpMap(IndexMap<String, TtpValue>);

impl TtpMap {
    /// Creates an empty `TtpMap`.
    #[must_use]
    pub fn new() -> Self {
        TtpMap(IndexMap::new())
    }

    /// Creates an empty `TtpMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TtpMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tesira_ttp::{TtpMap, TtpValue};
    ///
    /// let mut map = TtpMap::new();
    /// assert!(map.insert("mute".to_string(), TtpValue::from(false)).is_none());
    /// assert!(map.insert("mute".to_string(), TtpValue::from(true)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: TtpValue) -> Option<TtpValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TtpValue> {
        self.0.get(key)
    }

    /// Returns the value for `key`, or [`Error::KeyNotFound`].
    ///
    /// # Errors
    ///
    /// Fails when the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tesira_ttp::{Error, TtpMap, TtpValue};
    ///
    /// let map: TtpMap = [("value".to_string(), TtpValue::from(-10.5))].into_iter().collect();
    /// assert_eq!(map.require("value").unwrap().as_f64().unwrap(), -10.5);
    /// assert_eq!(map.require("level"), Err(Error::key_not_found("level")));
    /// ```
    pub fn require(&self, key: &str) -> Result<&TtpValue> {
        self.0.get(key).ok_or_else(|| Error::key_not_found(key))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, TtpValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, TtpValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, TtpValue> {
        self.0.iter()
    }
}

impl From<HashMap<String, TtpValue>> for TtpMap {
    fn from(map: HashMap<String, TtpValue>) -> Self {
        TtpMap(map.into_iter().collect())
    }
}

impl From<TtpMap> for HashMap<String, TtpValue> {
    fn from(map: TtpMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for TtpMap {
    type Item = (String, TtpValue);
    type IntoIter = indexmap::map::IntoIter<String, TtpValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TtpMap {
    type Item = (&'a String, &'a TtpValue);
    type IntoIter = indexmap::map::Iter<'a, String, TtpValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, TtpValue)> for TtpMap {
    fn from_iter<T: IntoIterator<Item = (String, TtpValue)>>(iter: T) -> Self {
        TtpMap(IndexMap::from_iter(iter))
    }
}
