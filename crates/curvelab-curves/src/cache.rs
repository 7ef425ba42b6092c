//! Memoisation of point values.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::trace;

use curvelab_core::types::Date;

/// Entries held before a full cache starts over.
///
/// Covers every date of a 40 year daily grid.
pub const DEFAULT_CAPACITY: usize = 16_384;

/// Date-keyed value cache, safe for concurrent readers.
///
/// A disabled cache stores nothing and always misses. Entries are dropped
/// when the owning curve is reseeded or mutated, and all at once when an
/// insert would exceed the capacity.
#[derive(Debug)]
pub struct QueryCache<T> {
    enabled: bool,
    capacity: usize,
    entries: RwLock<HashMap<Date, T>>,
}

impl<T: Clone> QueryCache<T> {
    /// Creates an empty cache holding at most [`DEFAULT_CAPACITY`] dates.
    pub fn new(enabled: bool) -> Self {
        Self::with_capacity(enabled, DEFAULT_CAPACITY)
    }

    /// Creates an empty cache holding at most `capacity` dates.
    pub fn with_capacity(enabled: bool, capacity: usize) -> Self {
        Self {
            enabled: enabled && capacity > 0,
            capacity,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Maximum number of cached dates.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether values are stored.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cached value for `date`.
    pub fn get(&self, date: Date) -> Option<T> {
        if !self.enabled {
            return None;
        }
        self.entries.read().get(&date).cloned()
    }

    /// Stores `value` for `date`, first emptying a full cache.
    pub fn insert(&self, date: Date, value: T) {
        if !self.enabled {
            return;
        }
        let mut entries = self.entries.write();
        if entries.len() >= self.capacity && !entries.contains_key(&date) {
            trace!(capacity = self.capacity, "curve cache full, starting over");
            entries.clear();
        }
        entries.insert(date, value);
    }

    /// Number of cached dates.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        if !entries.is_empty() {
            trace!(entries = entries.len(), "clearing curve cache");
            entries.clear();
        }
    }
}
