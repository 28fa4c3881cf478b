//! Common utilities for integration tests

#![allow(dead_code)]

pub mod cli;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A source tree, a destination, and an isolated config home
pub struct TestBackup {
    temp_dir: TempDir,
}

impl TestBackup {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let backup = Self { temp_dir };

        fs::create_dir_all(backup.source().join("docs")).expect("Failed to create source");
        fs::write(backup.source().join("docs/notes.txt"), b"notes").expect("Failed to write source");
        fs::create_dir_all(backup.dest()).expect("Failed to create dest");
        fs::create_dir_all(backup.config_home()).expect("Failed to create config home");

        backup
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root().join("source")
    }

    pub fn dest(&self) -> PathBuf {
        self.root().join("dest")
    }

    pub fn config_home(&self) -> PathBuf {
        self.root().join("config")
    }

    /// Create empty snapshot directories, one per name
    pub fn seed(&self, names: &[&str]) {
        for name in names {
            fs::create_dir_all(self.dest().join(name)).expect("Failed to seed snapshot");
        }
    }

    /// Seed one snapshot per day in `[first, last]` of the given month
    pub fn seed_month(&self, year: i32, month: u32, first: u32, last: u32) {
        for day in first..=last {
            let name = format!("{:04}{:02}{:02}-120000", year, month, day);
            fs::create_dir_all(self.dest().join(name)).expect("Failed to seed snapshot");
        }
    }

    /// Write a config file and return its path
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.root().join("snapkeep.toml");
        fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Sorted entry names in the destination
    pub fn dest_entries(&self) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(self.dest())
            .expect("Failed to read dest")
            .map(|e| e.expect("Bad dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
