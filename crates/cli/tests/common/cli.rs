//! CLI command execution helpers with automatic timing
//!
//! This module provides a wrapper around the `snapkeep` binary that
//! measures execution time and provides convenient assertion methods.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct SnapkeepCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
}

impl SnapkeepCommand {
    /// Create a new command in the given working directory
    ///
    /// `XDG_CONFIG_HOME` points into the working directory so a developer's
    /// own config file never leaks into a test. Colour forcing from the
    /// caller's environment is cleared; piped stdout is then plain text.
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        let working_dir = working_dir.as_ref().to_path_buf();
        let mut env = HashMap::new();
        env.insert(
            "XDG_CONFIG_HOME".to_string(),
            working_dir.join("config").to_string_lossy().into_owned(),
        );

        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_snapkeep")),
            working_dir,
            args: Vec::new(),
            env,
        }
    }

    /// Add command arguments
    pub fn args<S: AsRef<str>>(&mut self, args: &[S]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Set environment variable
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .envs(&self.env)
            .env_remove("RUST_LOG")
            .env_remove("FORCE_COLOR")
            .env_remove("CLICOLOR_FORCE")
            .output()
            .context("Failed to execute command")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Snapshot names (`YYYYMMDD-HHMMSS`) mentioned on stdout, in order
    pub fn snapshot_names(&self) -> Vec<String> {
        self.stdout
            .lines()
            .filter_map(extract_snapshot_name)
            .collect()
    }
}

/// Extract the first snapshot name from a line of text
pub fn extract_snapshot_name(line: &str) -> Option<String> {
    line.as_bytes().windows(15).enumerate().find_map(|(i, window)| {
        let is_name = window
            .iter()
            .enumerate()
            .all(|(j, b)| if j == 8 { *b == b'-' } else { b.is_ascii_digit() });
        is_name.then(|| line[i..i + 15].to_string())
    })
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// snapkeep!(dir, "plan", dest).assert_success()?;
/// ```
#[macro_export]
macro_rules! snapkeep {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::SnapkeepCommand::new($dir);
        cmd.args(&[$(AsRef::<str>::as_ref(&$arg)),*]);
        cmd
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_name_extraction() {
        assert_eq!(
            extract_snapshot_name("    2018-W13  20180331-120000"),
            Some("20180331-120000".to_string())
        );
        assert_eq!(extract_snapshot_name("Deleting: 3 snapshots"), None);
    }

    #[test]
    fn test_snapshot_names_in_order() {
        let result = CommandResult {
            stdout: "20180101-000000\nnoise\n  20180102-000000\n".to_string(),
            stderr: String::new(),
            exit_code: 0,
            duration: Duration::from_millis(10),
        };

        assert_eq!(result.snapshot_names(), vec!["20180101-000000", "20180102-000000"]);
    }
}
