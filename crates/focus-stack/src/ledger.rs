//! `InitLedger`: which entries have already run `on_initialize`.
//!
//! Membership is independent of stack membership: an entry that finished and
//! was popped stays in the ledger, so pushing the same instance again (e.g.
//! from a pool) skips `on_initialize` unless the caller asks for a
//! re-initialization.
//!
//! The ledger stores [`WeakEntry`] handles keyed by entry identity.  A weak
//! handle never keeps the entry alive, but it does keep the allocation's
//! address reserved, so a key match always means "same entry".  Dead handles
//! are pruned when the map has doubled since the last prune.

use std::collections::hash_map::Entry;

use focus_behavior::{EntryRef, WeakEntry};
use focus_core::EntryId;

#[cfg(not(feature = "fx-hash"))]
type LedgerMap = std::collections::HashMap<EntryId, WeakEntry>;
#[cfg(feature = "fx-hash")]
type LedgerMap = rustc_hash::FxHashMap<EntryId, WeakEntry>;

/// Smallest ledger size at which an automatic prune is attempted.
const MIN_PRUNE_THRESHOLD: usize = 64;

/// Identity-keyed set of initialized entries that does not own them.
#[derive(Debug)]
pub struct InitLedger {
    entries:  LedgerMap,
    prune_at: usize,
}

impl Default for InitLedger {
    fn default() -> Self {
        Self {
            entries:  LedgerMap::default(),
            prune_at: MIN_PRUNE_THRESHOLD,
        }
    }
}

impl InitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, entry: &EntryRef) -> bool {
        self.entries.contains_key(&entry.id())
    }

    /// Track `entry`.  Returns `true` if it was not tracked before, i.e. the
    /// caller should run `on_initialize`.
    pub fn insert(&mut self, entry: &EntryRef) -> bool {
        if self.entries.len() >= self.prune_at {
            self.prune();
            self.prune_at = (self.entries.len() * 2).max(MIN_PRUNE_THRESHOLD);
        }
        match self.entries.entry(entry.id()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(entry.downgrade());
                true
            }
        }
    }

    /// Forget `entry`.  Returns `true` if it was tracked.
    pub fn remove(&mut self, entry: &EntryRef) -> bool {
        self.entries.remove(&entry.id()).is_some()
    }

    /// Drop handles whose entries no longer exist.  Returns how many were
    /// removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, weak| weak.is_alive());
        let removed = before - self.entries.len();
        if removed > 0 {
            log::trace!("initialization ledger pruned {removed} dead entries");
        }
        removed
    }

    /// Number of tracked identities, including dead ones not yet pruned.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tracked entries that are still alive.
    pub fn live_count(&self) -> usize {
        self.entries.values().filter(|weak| weak.is_alive()).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.prune_at = MIN_PRUNE_THRESHOLD;
    }
}
