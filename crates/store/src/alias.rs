//! The "latest" alias pointing at the newest snapshot

use crate::{Result, StoreError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Symlink inside the destination that names the most recent snapshot
#[derive(Debug, Clone)]
pub struct LatestAlias {
    path: PathBuf,
}

impl LatestAlias {
    pub fn new(dest: &Path, name: &str) -> Self {
        Self {
            path: dest.join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The alias path if it currently resolves to something
    ///
    /// A missing or dangling alias yields `None`: the next transfer simply
    /// runs without a hard-link source.
    pub fn resolve(&self) -> Option<&Path> {
        if self.path.exists() {
            Some(&self.path)
        } else {
            None
        }
    }

    /// Point the alias at `snapshot_dir`, replacing any previous alias
    ///
    /// The link target is the snapshot's file name, relative to the alias
    /// itself, so the destination can be moved or mounted elsewhere.
    pub fn update(&self, snapshot_dir: &Path) -> Result<()> {
        match std::fs::symlink_metadata(&self.path) {
            Ok(meta) if meta.file_type().is_symlink() => {
                std::fs::remove_file(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
            }
            Ok(_) => {
                return Err(StoreError::AliasNotSymlink {
                    path: self.path.clone(),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io(&self.path, e)),
        }

        let target = link_target(&self.path, snapshot_dir);
        create_symlink(&target, &self.path)?;
        tracing::info!("{} -> {}", self.path.display(), target.display());
        Ok(())
    }
}

/// Relative target when the snapshot sits next to the alias, absolute otherwise
fn link_target(alias: &Path, snapshot_dir: &Path) -> PathBuf {
    match (alias.parent(), snapshot_dir.parent(), snapshot_dir.file_name()) {
        (Some(a), Some(s), Some(name)) if a == s => PathBuf::from(name),
        _ => snapshot_dir.to_path_buf(),
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link).map_err(|e| StoreError::io(link, e))
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::windows::fs::symlink_dir(target, link).map_err(|e| StoreError::io(link, e))
}
