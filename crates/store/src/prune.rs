//! Deletion of pruned snapshot directories
//!
//! The keep/delete partition is computed once before anything is removed, so
//! deletions are independent of each other and run concurrently on the
//! blocking pool. A directory that is already gone counts as removed.

use crate::StoreError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::task::{Id, JoinSet};

/// Outcome of a pruning pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
    /// Directories removed (or that would be, in dry-run mode)
    pub removed: Vec<PathBuf>,
    /// Directories that had already disappeared
    pub already_gone: Vec<PathBuf>,
    /// Directories that could not be removed, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// Nothing was touched
    pub dry_run: bool,
}

impl PruneReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    fn sort(&mut self) {
        self.removed.sort();
        self.already_gone.sort();
        self.failed.sort();
    }
}

enum Removal {
    Removed,
    AlreadyGone,
}

fn remove_snapshot_dir(path: &Path) -> Result<Removal, StoreError> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(Removal::Removed),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Removal::AlreadyGone),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Remove every directory in `targets`
///
/// Never fails as a whole: per-directory failures are logged and collected in
/// the report so one stubborn directory does not block the rest.
pub async fn prune(targets: Vec<PathBuf>, dry_run: bool) -> PruneReport {
    prune_with(targets, dry_run, remove_snapshot_dir).await
}

async fn prune_with<F>(targets: Vec<PathBuf>, dry_run: bool, remove: F) -> PruneReport
where
    F: Fn(&Path) -> Result<Removal, StoreError> + Copy + Send + 'static,
{
    let mut report = PruneReport {
        dry_run,
        ..Default::default()
    };

    if dry_run {
        report.removed = targets;
        report.sort();
        return report;
    }

    let mut tasks = JoinSet::new();
    let mut in_flight: HashMap<Id, PathBuf> = HashMap::new();
    for path in targets {
        let task_path = path.clone();
        let handle = tasks.spawn_blocking(move || remove(&task_path));
        in_flight.insert(handle.id(), path);
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, outcome) = match joined {
            Ok((id, outcome)) => (id, outcome),
            Err(e) => (e.id(), Err(StoreError::from(e))),
        };
        let path = in_flight.remove(&id).unwrap_or_default();

        match outcome {
            Ok(Removal::Removed) => {
                tracing::debug!("Removed {}", path.display());
                report.removed.push(path);
            }
            Ok(Removal::AlreadyGone) => {
                tracing::debug!("{} already removed", path.display());
                report.already_gone.push(path);
            }
            Err(e) => {
                let reason = match std::error::Error::source(&e) {
                    Some(source) => format!("{}: {}", e, source),
                    None => e.to_string(),
                };
                tracing::warn!("Failed to remove {}: {}", path.display(), reason);
                report.failed.push((path, reason));
            }
        }
    }

    report.sort();
    report
}
