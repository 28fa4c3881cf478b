//! Dated snapshot records

use chrono::NaiveDate;
use std::cmp::Ordering;

/// One backup instance: a calendar date plus an opaque identifier
///
/// Several snapshots may share a date, identifiers are expected to be
/// distinct. Ordering is chronological: by date, then by identifier, so among
/// snapshots taken the same day the greater identifier counts as the later one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot<Id> {
    /// Calendar date the snapshot was taken
    pub date: NaiveDate,
    /// Identifier (directory path, name, ...)
    pub id: Id,
}

impl<Id> Snapshot<Id> {
    /// Create a new snapshot record
    pub fn new(date: NaiveDate, id: Id) -> Self {
        Self { date, id }
    }
}

impl<Id: Ord> PartialOrd for Snapshot<Id> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Id: Ord> Ord for Snapshot<Id> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.id.cmp(&other.id))
    }
}
