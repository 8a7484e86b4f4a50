//! Record store for earbudtracker.
//!
//! This module provides the authoritative in-memory collection of reports,
//! keyed by id, along with filtered search and the recency view.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::recency::{MostRecent, RecencyIndex, RecordLookup};
use crate::record::{Record, RecordId, Status};

/// In-memory store of lost-and-found reports.
///
/// Provides:
/// - O(1) lookup by id
/// - Enumeration in insertion order
/// - Case-insensitive brand/color search over lost records
/// - Newest-first traversal of lost records via a [`RecencyIndex`]
///
/// Records are never removed. The store is the only owner of record data;
/// the recency index refers to records by id.
#[derive(Debug, Default)]
pub struct RecordStore {
    /// Records keyed by id.
    records: HashMap<RecordId, Record>,
    /// Ids in insertion order.
    order: Vec<RecordId>,
    /// Newest-first view over the same records.
    recency: RecencyIndex,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a pair of earbuds as lost.
    pub fn create(
        &mut self,
        brand: impl Into<String>,
        color: impl Into<String>,
        location: impl Into<String>,
    ) -> &Record {
        self.create_with_status(brand, color, location, Status::Lost)
    }

    /// Insert a new record with an explicit initial status.
    pub fn create_with_status(
        &mut self,
        brand: impl Into<String>,
        color: impl Into<String>,
        location: impl Into<String>,
        status: Status,
    ) -> &Record {
        let record = Record::new(brand, color, location, status);
        let id = record.id();

        self.recency.record_created(&record);
        self.order.push(id);
        debug!(%id, %status, "created record");

        self.records.entry(id).or_insert(record)
    }

    /// Get a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this id.
    pub fn get(&self, id: RecordId) -> Result<&Record> {
        self.records.get(&id).ok_or_else(|| Error::not_found(id))
    }

    /// All records, in the order they were created.
    pub fn all(&self) -> impl Iterator<Item = &Record> + '_ {
        self.order.iter().filter_map(move |id| self.records.get(id))
    }

    /// All records that are still lost, in the order they were created.
    pub fn lost(&self) -> impl Iterator<Item = &Record> + '_ {
        self.all().filter(|record| record.is_lost())
    }

    /// Mark a record as found.
    ///
    /// Marking an already-found record succeeds without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this id. The store is
    /// left untouched in that case.
    pub fn mark_found(&mut self, id: RecordId) -> Result<&Record> {
        let record = self.records.get_mut(&id).ok_or_else(|| Error::not_found(id))?;
        if record.mark_found() {
            debug!(%id, "marked record found");
        } else {
            debug!(%id, "record already found");
        }
        Ok(&*record)
    }

    /// Find lost records matching the filter, in creation order.
    #[must_use]
    pub fn search(&self, filter: &SearchFilter) -> Vec<&Record> {
        let results: Vec<&Record> = self.lost().filter(|r| filter.matches(r)).collect();
        debug!(
            brand = %filter.brand,
            color = %filter.color,
            matches = results.len(),
            "searched records"
        );
        results
    }

    /// Up to `limit` lost records, newest first.
    pub fn most_recent(&self, limit: usize) -> MostRecent<'_, DateTime<Utc>, Self> {
        self.recency.most_recent(self, limit)
    }

    /// Number of records, lost or found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no record has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Summary counts over the store.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let lost = self.lost().count();
        let times = self.records.values().map(Record::reported_at);

        StoreStats {
            total: self.len(),
            lost,
            found: self.len() - lost,
            oldest: times.clone().min(),
            newest: times.max(),
        }
    }
}

impl RecordLookup for RecordStore {
    fn lookup(&self, id: RecordId) -> Option<&Record> {
        self.records.get(&id)
    }
}

/// Brand/color substring filter for [`RecordStore::search`].
///
/// Both terms are lower-cased on construction and otherwise kept verbatim,
/// whitespace included. An empty term matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    brand: String,
    color: String,
}

impl SearchFilter {
    /// Build a filter from raw user input.
    #[must_use]
    pub fn new(brand: &str, color: &str) -> Self {
        Self {
            brand: brand.to_lowercase(),
            color: color.to_lowercase(),
        }
    }

    /// Filter on brand only.
    #[must_use]
    pub fn brand(brand: &str) -> Self {
        Self::new(brand, "")
    }

    /// Filter on color only.
    #[must_use]
    pub fn color(color: &str) -> Self {
        Self::new("", color)
    }

    /// Check if a record's brand and color both satisfy the filter.
    ///
    /// Status is not considered here.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        contains_ignore_case(record.brand(), &self.brand)
            && contains_ignore_case(record.color(), &self.color)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of records.
    pub total: usize,
    /// Records still lost.
    pub lost: usize,
    /// Records marked found.
    pub found: usize,
    /// Timestamp of the oldest report.
    pub oldest: Option<DateTime<Utc>>,
    /// Timestamp of the newest report.
    pub newest: Option<DateTime<Utc>>,
}
