//! Configuration file handling
//!
//! Effective settings are built in three layers: built-in defaults, the
//! optional TOML config file, then command-line overrides.

use anyhow::{Context, Result};
use retention::RetentionPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete snapkeep configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub retention: RetentionPolicy,
    pub transfer: TransferConfig,
}

/// `[transfer]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Sync program to run (default: rsync)
    pub program: String,
    /// Extra arguments, split shell-style (default: -a)
    pub args: String,
    /// Name of the alias pointing at the newest snapshot (default: latest)
    pub latest: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            program: store::transfer::DEFAULT_PROGRAM.to_string(),
            args: store::transfer::DEFAULT_ARGS.to_string(),
            latest: "latest".to_string(),
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub days: Option<usize>,
    pub weeks: Option<usize>,
    pub months: Option<usize>,
    pub years: Option<usize>,
    pub rsync_args: Option<String>,
    pub latest: Option<String>,
}

impl Config {
    /// Layer command-line overrides on top of this config
    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if let Some(days) = overrides.days {
            self.retention.days = days;
        }
        if let Some(weeks) = overrides.weeks {
            self.retention.weeks = weeks;
        }
        if let Some(months) = overrides.months {
            self.retention.months = months;
        }
        if let Some(years) = overrides.years {
            self.retention.years = years;
        }
        if let Some(args) = &overrides.rsync_args {
            self.transfer.args = args.clone();
        }
        if let Some(latest) = &overrides.latest {
            self.transfer.latest = latest.clone();
        }
        self
    }

    /// Check the merged configuration
    pub fn validate(&self) -> Result<()> {
        self.retention.validate()?;

        if self.transfer.program.trim().is_empty() {
            anyhow::bail!("transfer.program must not be empty");
        }

        if shlex::split(&self.transfer.args).is_none() {
            anyhow::bail!("transfer.args has unbalanced quotes: {}", self.transfer.args);
        }

        let latest = &self.transfer.latest;
        if latest.is_empty() || latest == "." || latest == ".." || latest.contains('/') {
            anyhow::bail!("transfer.latest must be a plain file name, got '{}'", latest);
        }
        if store::parse_snapshot_date(latest).is_some() {
            anyhow::bail!("transfer.latest '{}' looks like a snapshot name", latest);
        }

        Ok(())
    }
}

/// Default config file location (`$XDG_CONFIG_HOME/snapkeep/config.toml`)
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("snapkeep").join("config.toml"))
}

/// Load configuration
///
/// An explicitly given file must exist. The default location is optional and
/// falls back to built-in defaults when absent.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_file_path() {
            Some(path) if path.exists() => path,
            _ => {
                tracing::debug!("No config file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    load_from(&path)
}

/// Parse a config file
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Write the example config to `path` unless something is already there
pub fn init_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, example_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// Commented example configuration with every key at its default
pub fn example_config() -> &'static str {
    r#"# snapkeep configuration
#
# Command-line flags override everything here.

[retention]
# Most recent daily snapshots to keep
days = 7
# Most recent ISO weeks to keep one snapshot for
weeks = 4
# Most recent months to keep one snapshot for
months = 12
# Most recent years to keep one snapshot for
years = 10

[transfer]
# Sync program; it receives <args> --delete <source>/ [--link-dest=...] <target>
program = "rsync"
# Extra arguments, split like a shell would
args = "-a"
# Alias inside the destination that points at the newest snapshot
latest = "latest"
"#
}
