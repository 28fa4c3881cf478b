//! Discovery of existing snapshots in a destination

use crate::name::parse_snapshot_date;
use crate::{Result, StoreError};
use retention::Snapshot;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List the dated snapshot directories directly under `dest`
///
/// Only real directories whose names parse as snapshot names are returned.
/// Symlinks (the "latest" alias among them), plain files and badly named
/// entries are skipped. A destination that does not exist yet holds no
/// snapshots.
pub fn discover(dest: &Path) -> Result<Vec<Snapshot<PathBuf>>> {
    if !dest.exists() {
        tracing::debug!("Destination {} does not exist yet", dest.display());
        return Ok(Vec::new());
    }

    let mut snapshots = Vec::new();

    let walker = WalkDir::new(dest)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| StoreError::Scan {
            path: dest.to_path_buf(),
            source,
        })?;

        let name = entry.file_name().to_string_lossy();
        let date = match parse_snapshot_date(&name) {
            Some(date) => date,
            None => {
                tracing::debug!("Skipping {}: not a snapshot name", name);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            tracing::debug!("Skipping {}: not a directory", name);
            continue;
        }

        snapshots.push(Snapshot::new(date, entry.into_path()));
    }

    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_destination_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let found = discover(&temp_dir.path().join("nowhere")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_discovers_only_dated_directories() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path();

        fs::create_dir(dest.join("20180101-120000")).unwrap();
        fs::create_dir(dest.join("20180102-120000")).unwrap();
        fs::create_dir(dest.join("20181345-000000")).unwrap(); // impossible date
        fs::create_dir(dest.join("notes")).unwrap();
        fs::write(dest.join("20180103-120000"), b"not a directory").unwrap();

        let found = discover(dest).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|s| s.id.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["20180101-120000", "20180102-120000"]);
        assert_eq!(found[0].date, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(found[1].id, dest.join("20180102-120000"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_candidates() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path();

        fs::create_dir(dest.join("20180101-120000")).unwrap();
        std::os::unix::fs::symlink("20180101-120000", dest.join("20180105-000000")).unwrap();
        std::os::unix::fs::symlink("20180101-120000", dest.join("latest")).unwrap();

        let found = discover(dest).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, dest.join("20180101-120000"));
    }

    #[test]
    fn test_nested_directories_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path();

        fs::create_dir_all(dest.join("20180101-120000/20170101-000000")).unwrap();

        let found = discover(dest).unwrap();
        assert_eq!(found.len(), 1);
    }
}
