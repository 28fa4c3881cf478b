//! Period keys used to bucket snapshots

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarsened representation of a date at one granularity
///
/// Keys of the same granularity order chronologically. Keys of different
/// granularities are never mixed inside one bucket map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    /// (year, month, day)
    Day(i32, u32, u32),
    /// (ISO year, ISO week)
    Week(i32, u32),
    /// (year, month)
    Month(i32, u32),
    /// (year)
    Year(i32),
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Day(y, m, d) => write!(f, "{:04}-{:02}-{:02}", y, m, d),
            PeriodKey::Week(y, w) => write!(f, "{:04}-W{:02}", y, w),
            PeriodKey::Month(y, m) => write!(f, "{:04}-{:02}", y, m),
            PeriodKey::Year(y) => write!(f, "{:04}", y),
        }
    }
}

/// Retention granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// All granularities, finest first
    pub const ALL: [Granularity; 4] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    /// Map a date to its bucket at this granularity
    ///
    /// Weeks use the ISO calendar: 2018-12-31 belongs to week 1 of 2019.
    pub fn key(self, date: NaiveDate) -> PeriodKey {
        match self {
            Granularity::Day => PeriodKey::Day(date.year(), date.month(), date.day()),
            Granularity::Week => {
                let iso = date.iso_week();
                PeriodKey::Week(iso.year(), iso.week())
            }
            Granularity::Month => PeriodKey::Month(date.year(), date.month()),
            Granularity::Year => PeriodKey::Year(date.year()),
        }
    }

    /// Plural tier label used in reports and config keys
    pub fn tier_name(self) -> &'static str {
        match self {
            Granularity::Day => "days",
            Granularity::Week => "weeks",
            Granularity::Month => "months",
            Granularity::Year => "years",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tier_name())
    }
}
