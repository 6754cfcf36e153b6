//! Interning storage shared by the interval and weight factories.
//!
//! A [`Keeper`] owns one `Arc` per distinct value handed to it and returns
//! that same `Arc` whenever an equal value is kept again. Entries whose only
//! remaining owner is the keeper itself are idle and may be purged, either
//! explicitly or automatically once an optional capacity is reached.
//!
//! When a purge frees too little, the next automatic purge waits until the
//! store has doubled past what survived, so a store holding more live entries
//! than its capacity does not rescan on every insert.

use std::collections::HashSet;
use std::hash::{BuildHasherDefault, Hash};
use std::sync::Arc;

use seahash::SeaHasher;
use tracing::debug;

pub type KeeperHasher = BuildHasherDefault<SeaHasher>;

#[derive(Debug)]
pub struct Keeper<V: Eq + Hash> {
    kept: HashSet<Arc<V>, KeeperHasher>,
    capacity: Option<usize>,
    // size at which the next automatic purge runs
    threshold: usize,
}

impl<V: Eq + Hash> Keeper<V> {
    pub fn new() -> Self {
        Self::with_capacity(None)
    }
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            kept: HashSet::default(),
            capacity,
            threshold: capacity.unwrap_or(usize::MAX),
        }
    }
    /// Returns the canonical instance for `value` and whether it was
    /// already kept before this call.
    pub fn keep(&mut self, value: V) -> (Arc<V>, bool) {
        if let Some(kept) = self.kept.get(&value) {
            return (Arc::clone(kept), true);
        }
        if let Some(capacity) = self.capacity {
            if self.kept.len() >= self.threshold {
                self.purge();
                self.threshold = capacity.max(self.kept.len().saturating_mul(2));
            }
        }
        let keepsake = Arc::new(value);
        self.kept.insert(Arc::clone(&keepsake));
        (keepsake, false)
    }
    pub fn get(&self, value: &V) -> Option<Arc<V>> {
        self.kept.get(value).cloned()
    }
    /// Drops every entry nobody outside the keeper holds. Returns the number
    /// of entries released.
    pub fn purge(&mut self) -> usize {
        let before = self.kept.len();
        self.kept.retain(|kept| Arc::strong_count(kept) > 1);
        let released = before - self.kept.len();
        if released > 0 {
            debug!(released, remaining = self.kept.len(), "purged idle keepsakes");
        }
        released
    }
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
        self.threshold = capacity.unwrap_or(usize::MAX);
    }
    /// Size at which the next automatic purge runs. Equals the capacity
    /// unless the last purge left more live entries than half of it.
    pub fn threshold(&self) -> Option<usize> {
        self.capacity.map(|_| self.threshold)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

impl<V: Eq + Hash> Default for Keeper<V> {
    fn default() -> Self {
        Self::new()
    }
}
