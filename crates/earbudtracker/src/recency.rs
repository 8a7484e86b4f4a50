//! Recency index over stored records.
//!
//! The index keeps record ids ordered by a key extracted from each record
//! (by default `reported_at`) and walks them newest-first. It never stores
//! status: liveness is read through a [`RecordLookup`] at traversal time, so
//! a record marked found after indexing is skipped without touching the index.
//!
//! Ties on the key are broken by insertion sequence. The record inserted later
//! is treated as more recent.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;
use std::iter::Rev;

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::record::{Record, RecordId};

/// Read access to records by id.
///
/// Implemented by the record store so the index can resolve live status.
pub trait RecordLookup {
    /// Look up a record, returning `None` if the id is unknown.
    fn lookup(&self, id: RecordId) -> Option<&Record>;
}

/// A single index entry. Field order defines the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry<K> {
    key: K,
    sequence: u64,
    id: RecordId,
}

/// Ordered view over records, newest first.
pub struct RecencyIndex<K = DateTime<Utc>> {
    key_fn: fn(&Record) -> K,
    entries: BTreeSet<Entry<K>>,
    next_sequence: u64,
}

impl RecencyIndex<DateTime<Utc>> {
    /// Create an index ordered by the time each record was reported.
    #[must_use]
    pub fn by_reported_at() -> Self {
        Self::new(Record::reported_at)
    }
}

impl Default for RecencyIndex<DateTime<Utc>> {
    fn default() -> Self {
        Self::by_reported_at()
    }
}

impl<K: Ord + Copy> RecencyIndex<K> {
    /// Create an index ordered by the key `key_fn` extracts.
    ///
    /// Larger keys are considered more recent.
    #[must_use]
    pub fn new(key_fn: fn(&Record) -> K) -> Self {
        Self {
            key_fn,
            entries: BTreeSet::new(),
            next_sequence: 0,
        }
    }

    /// Register a newly created record.
    pub fn record_created(&mut self, record: &Record) {
        let entry = Entry {
            key: (self.key_fn)(record),
            sequence: self.next_sequence,
            id: record.id(),
        };
        self.next_sequence += 1;
        self.entries.insert(entry);
        trace!(id = %record.id(), sequence = entry.sequence, "indexed record");
    }

    /// Number of indexed records, lost or found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been indexed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lazily yield up to `limit` lost records, newest first.
    ///
    /// Found records are skipped and do not count towards `limit`. The
    /// returned iterator is `Clone`, so a traversal can be restarted.
    pub fn most_recent<'a, L: RecordLookup>(
        &'a self,
        lookup: &'a L,
        limit: usize,
    ) -> MostRecent<'a, K, L> {
        MostRecent {
            entries: self.entries.iter().rev(),
            lookup,
            remaining: limit,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for RecencyIndex<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyIndex")
            .field("entries", &self.entries)
            .field("next_sequence", &self.next_sequence)
            .finish_non_exhaustive()
    }
}

/// Iterator returned by [`RecencyIndex::most_recent`].
pub struct MostRecent<'a, K, L> {
    entries: Rev<btree_set::Iter<'a, Entry<K>>>,
    lookup: &'a L,
    remaining: usize,
}

impl<K, L> Clone for MostRecent<'_, K, L> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            lookup: self.lookup,
            remaining: self.remaining,
        }
    }
}

impl<K, L> fmt::Debug for MostRecent<'_, K, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MostRecent")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<'a, K, L: RecordLookup> Iterator for MostRecent<'a, K, L> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let lookup = self.lookup;
        for entry in self.entries.by_ref() {
            match lookup.lookup(entry.id) {
                Some(record) if record.is_lost() => {
                    self.remaining -= 1;
                    return Some(record);
                }
                Some(_) => {}
                None => trace!(id = %entry.id, "indexed id missing from lookup"),
            }
        }
        self.remaining = 0;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining.min(self.entries.len())))
    }
}

impl<K, L: RecordLookup> std::iter::FusedIterator for MostRecent<'_, K, L> {}
