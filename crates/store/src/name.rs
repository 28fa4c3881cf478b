//! Snapshot directory naming
//!
//! Snapshots are named after the local time of the run, `YYYYMMDD-HHMMSS`.
//! Only the leading date is significant for retention.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// strftime format of snapshot directory names
pub const NAME_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Name of a snapshot directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotName(String);

impl SnapshotName {
    /// Name for a snapshot taken at `now`
    pub fn at(now: NaiveDateTime) -> Self {
        Self(now.format(NAME_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<std::path::Path> for SnapshotName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

/// Parse the date encoded in a snapshot directory name
///
/// Accepts names starting with eight digits followed by `-` whose digits form
/// a valid calendar date. Returns `None` for everything else, including
/// impossible dates such as `20181345-...`.
pub fn parse_snapshot_date(name: &str) -> Option<NaiveDate> {
    let bytes = name.as_bytes();
    if bytes.len() < 9 || bytes[8] != b'-' || !bytes[..8].iter().all(u8::is_ascii_digit) {
        return None;
    }

    let year: i32 = name[0..4].parse().ok()?;
    let month: u32 = name[4..6].parse().ok()?;
    let day: u32 = name[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
