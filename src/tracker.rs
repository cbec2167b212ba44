//! Cycle and depth tracking for a single serialization call.

use crate::Value;
use std::collections::hash_map::{Entry as Slot, HashMap};

/// Outcome of trying to enter a value during traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    /// The value may be visited; composites are now recorded as seen.
    Proceed,
    /// `depth` is past the configured ceiling.
    DepthExceeded,
    /// The composite was already entered earlier in this call.
    AlreadyVisited,
}

/// Depth ceiling plus the set of composite identities seen so far.
///
/// Each recorded identity keeps a handle to its composite, so an allocation
/// produced on the fly (by a getter or a host object) stays alive until the
/// tracker is dropped and its address cannot be reused by a later composite.
///
/// A tracker lives for exactly one top-level call. Identities are never
/// removed when a branch finishes, so a composite reachable along two
/// unrelated paths is reported as [`Entry::AlreadyVisited`] the second time,
/// not only when it is its own ancestor.
///
/// # Examples
///
/// ```rust
/// use safe_stringify::{Entry, Object, Tracker, Value};
///
/// let shared: Value = Object::new().into();
/// let mut tracker = Tracker::new(2);
///
/// assert_eq!(tracker.enter(&shared, 1), Entry::Proceed);
/// assert_eq!(tracker.enter(&shared, 1), Entry::AlreadyVisited);
/// assert_eq!(tracker.enter(&Value::from(1), 3), Entry::DepthExceeded);
/// ```
#[derive(Debug, Clone)]
pub struct Tracker {
    max_depth: usize,
    visited: HashMap<usize, Value>,
}

impl Tracker {
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Tracker {
            max_depth,
            visited: HashMap::new(),
        }
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    #[must_use]
    pub fn exceeds(&self, depth: usize) -> bool {
        depth > self.max_depth
    }

    /// Checks the depth ceiling, then (for composites) the visited set.
    ///
    /// On [`Entry::Proceed`] the composite's identity is recorded before the
    /// caller descends into its members, so a member pointing back at it is
    /// caught.
    pub fn enter(&mut self, value: &Value, depth: usize) -> Entry {
        if self.exceeds(depth) {
            return Entry::DepthExceeded;
        }
        let Some(id) = value.identity() else {
            return Entry::Proceed;
        };
        match self.visited.entry(id) {
            Slot::Occupied(_) => Entry::AlreadyVisited,
            Slot::Vacant(slot) => {
                slot.insert(value.clone());
                Entry::Proceed
            }
        }
    }

    /// Number of composites entered so far.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
