//! Change tracker
//!
//! Remembers every change key processed during this process's lifetime and
//! answers "is this new?" with a check-and-set. The set only grows; nothing
//! is evicted, so a key reported new once is never reported new again.
//!
//! The tracker has a single owner (the poll scheduler) and is mutated through
//! `&mut self`. Cycles never overlap, so no locking is needed.

use std::collections::HashSet;

use crate::domain::entities::ChangeKey;

/// Set of change keys already processed
pub type SeenSet = HashSet<ChangeKey>;

#[derive(Debug, Default)]
pub struct ChangeTracker {
    seen: SeenSet,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `key` is offered and records it; false
    /// on every later call.
    pub fn is_new(&mut self, key: ChangeKey) -> bool {
        self.seen.insert(key)
    }

    /// Bootstrap mode: record keys without reporting them. Returns how many
    /// were not already known.
    pub fn observe<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = ChangeKey>,
    {
        keys.into_iter()
            .map(|key| self.seen.insert(key))
            .filter(|inserted| *inserted)
            .count()
    }

    /// Read-only membership check
    pub fn contains(&self, key: &ChangeKey) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
