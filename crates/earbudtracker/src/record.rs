//! Core record types for earbudtracker.
//!
//! This module defines the lost-and-found report entity and its identifier,
//! plus the human-readable detail rendering used by the shell.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default strftime pattern for rendering `reported_at`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unique identifier of a record.
///
/// Generated randomly at creation and never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Whether the earbuds are still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Reported missing and not yet recovered.
    #[default]
    Lost,
    /// Recovered. Terminal state.
    Found,
}

impl Status {
    /// Check if the record has been recovered.
    #[must_use]
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lost => write!(f, "Lost"),
            Self::Found => write!(f, "Found"),
        }
    }
}

/// A single lost-and-found report.
///
/// Everything except `status` is fixed at construction. The fields are
/// private so the only way to change a record is [`Record::mark_found`],
/// which enforces the one-way `Lost -> Found` transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    brand: String,
    color: String,
    location: String,
    reported_at: DateTime<Utc>,
    status: Status,
}

impl Record {
    /// Create a new record with a fresh id, timestamped now.
    #[must_use]
    pub fn new(
        brand: impl Into<String>,
        color: impl Into<String>,
        location: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            id: RecordId::new(),
            brand: brand.into(),
            color: color.into(),
            location: location.into(),
            reported_at: Utc::now(),
            status,
        }
    }

    /// The record's unique id.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Brand as entered by the reporter.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Color as entered by the reporter.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Where the earbuds were lost.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// When the report was created.
    #[must_use]
    pub fn reported_at(&self) -> DateTime<Utc> {
        self.reported_at
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Check if the record is still lost.
    #[must_use]
    pub fn is_lost(&self) -> bool {
        !self.status.is_found()
    }

    /// Mark the record as found.
    ///
    /// Returns `true` if the status changed, `false` if it was already found.
    pub fn mark_found(&mut self) -> bool {
        let changed = self.is_lost();
        self.status = Status::Found;
        changed
    }

    /// Short `brand - color` label used in selection lists.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} - {}", self.brand, self.color)
    }

    /// Render the full detail block with a custom timestamp pattern.
    #[must_use]
    pub fn details<'a>(&'a self, timestamp_format: &'a str) -> RecordDetails<'a> {
        RecordDetails {
            record: self,
            timestamp_format,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.details(DEFAULT_TIMESTAMP_FORMAT), f)
    }
}

/// Multi-line detail view of a record.
#[derive(Debug, Clone, Copy)]
pub struct RecordDetails<'a> {
    record: &'a Record,
    timestamp_format: &'a str,
}

impl fmt::Display for RecordDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.record;
        let reported = r
            .reported_at
            .with_timezone(&Local)
            .format(self.timestamp_format);
        writeln!(f, "ID: {}", r.id)?;
        writeln!(f, "Brand: {}", r.brand)?;
        writeln!(f, "Color: {}", r.color)?;
        writeln!(f, "Location: {}", r.location)?;
        writeln!(f, "Date Reported: {reported}")?;
        writeln!(f, "Status: {}", r.status)
    }
}
