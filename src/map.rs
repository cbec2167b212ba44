//! Ordered map type for rendered objects.
//!
//! [`RenderedMap`] wraps an [`IndexMap`] so rendered object members keep the
//! order in which the source object enumerated them. Output is deterministic
//! for a given input without sorting keys.
//!
//! ## Examples
//!
//! ```rust
//! use safe_stringify::{Rendered, RenderedMap};
//!
//! let mut map = RenderedMap::new();
//! map.insert("name".to_string(), Rendered::from("Alice"));
//! map.insert("age".to_string(), Rendered::from(30.0));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Rendered;
use indexmap::IndexMap;

/// An insertion-ordered map of string keys to rendered nodes.
///
/// # Examples
///
/// ```rust
/// use safe_stringify::{Rendered, RenderedMap};
///
/// let mut map = RenderedMap::new();
/// map.insert("first".to_string(), Rendered::from(1.0));
/// map.insert("second".to_string(), Rendered::from(2.0));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedMap(IndexMap<String, Rendered>);

impl RenderedMap {
    #[must_use]
    pub fn new() -> Self {
        RenderedMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RenderedMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: String, value: Rendered) -> Option<Rendered> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Rendered> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Rendered> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Rendered> {
        self.0.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Rendered> {
        self.0.iter()
    }
}

impl IntoIterator for RenderedMap {
    type Item = (String, Rendered);
    type IntoIter = indexmap::map::IntoIter<String, Rendered>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RenderedMap {
    type Item = (&'a String, &'a Rendered);
    type IntoIter = indexmap::map::Iter<'a, String, Rendered>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Rendered)> for RenderedMap {
    fn from_iter<T: IntoIterator<Item = (String, Rendered)>>(iter: T) -> Self {
        RenderedMap(IndexMap::from_iter(iter))
    }
}
