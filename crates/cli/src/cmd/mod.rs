//! CLI command implementations

pub mod backup;
pub mod config;
pub mod plan;
pub mod prune;

/// Flags shared by every command that may touch the destination
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print the keep/delete lists before acting
    pub verbose: bool,
    /// Compute and report, change nothing
    pub dry_run: bool,
}
