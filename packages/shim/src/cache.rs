//! Identity cache: one future per record.
//!
//! Entries are keyed by [`RecordId`], never by contents, so two records with
//! the same fields get two futures while rewrapping the same record returns
//! the exact instance handed out before.
//!
//! The cache owns the future entry and, through the future, a strong
//! reference to the record. Entries live until the scope ends or
//! [`IdentityCache::sweep`] finds that nothing outside the caches can reach
//! the record or the future any more.

use std::collections::HashMap;
use std::sync::Arc;

use paramshim_core::{RecordId, UnderlyingRecord};

use crate::{FutureRecord, RecordKind};

/// Whether anything besides the caches still holds `future` or its record.
///
/// `cached_refs` is the number of cached futures, across every cache, that
/// hold this record. Those references do not count as outside holders.
fn is_reachable(future: &FutureRecord, cached_refs: usize) -> bool {
    Arc::strong_count(future.value()) > cached_refs || future.handle_count() > 1
}

/// Side table from record identity to the future built for it.
pub struct IdentityCache {
    kind: RecordKind,
    entries: HashMap<RecordId, FutureRecord>,
}

impl IdentityCache {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// The future previously stored for `record`, if any.
    pub fn get(&self, record: &UnderlyingRecord) -> Option<FutureRecord> {
        self.entries.get(&record.id()).cloned()
    }

    /// Remember `future` as the one future for `record`.
    pub fn insert(&mut self, record: &Arc<UnderlyingRecord>, future: FutureRecord) {
        log::debug!("caching {} future for {}", self.kind, record.id());
        self.entries.insert(record.id(), future);
    }

    /// Drop entries nobody outside this cache can reach. Returns how many
    /// were dropped.
    ///
    /// Only this cache's own future is discounted from a record's holders.
    /// When the same records are also cached elsewhere, sweep through
    /// [`ParamsScope::sweep`](crate::ParamsScope::sweep) instead.
    pub fn sweep(&mut self) -> usize {
        self.sweep_shared(|_| 1)
    }

    /// Ids of every cached record.
    pub(crate) fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.entries.keys().copied()
    }

    /// Sweep, discounting `cached_refs(id)` cached futures from each record's
    /// holders.
    pub(crate) fn sweep_shared(&mut self, cached_refs: impl Fn(RecordId) -> usize) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|id, future| is_reachable(future, cached_refs(*id)));
        let dropped = before - self.entries.len();
        log::trace!(
            "swept {} {} cache entries, {} left",
            dropped,
            self.kind,
            self.entries.len()
        );
        dropped
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for IdentityCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityCache")
            .field("kind", &self.kind)
            .field("entries", &self.entries.len())
            .finish()
    }
}
