//! Apply the retention policy to an existing destination

use super::RunOptions;
use crate::config::{self, Overrides};
use crate::{report, util};
use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream::Stdout};
use retention::{compute_keep_and_delete, RetentionPolicy, Snapshot};
use std::path::{Path, PathBuf};
use store::PruneReport;

pub async fn run(
    dest: &Path,
    config_path: Option<&Path>,
    overrides: &Overrides,
    opts: RunOptions,
) -> Result<()> {
    let config = config::load(config_path)?.apply(overrides);
    config.validate().context("Invalid configuration")?;

    if opts.dry_run {
        println!("{}", "Dry-run: nothing will be changed.".if_supports_color(Stdout, |t| t.yellow()));
    }

    let dest = util::absolutize(dest)?;
    prune_destination(&dest, &config.retention, None, opts).await?;
    Ok(())
}

/// Scan `dest`, compute the plan, report it when asked, then delete
///
/// `pending` is a snapshot the caller is about to create. A dry run never
/// creates it, so it is planned alongside the discovered ones to match what a
/// real run would delete. It is never handed to deletion.
pub async fn prune_destination(
    dest: &Path,
    policy: &RetentionPolicy,
    pending: Option<Snapshot<PathBuf>>,
    opts: RunOptions,
) -> Result<PruneReport> {
    let mut snapshots = store::discover(dest)
        .with_context(|| format!("Failed to scan {}", dest.display()))?;
    tracing::info!(
        "Found {} in {}",
        util::plural(snapshots.len(), "snapshot"),
        dest.display()
    );

    let pending = pending.filter(|_| opts.dry_run);
    if let Some(snapshot) = &pending {
        if !snapshots.iter().any(|s| s.id == snapshot.id) {
            snapshots.push(snapshot.clone());
        }
    }

    let plan = compute_keep_and_delete(&snapshots, policy);

    if opts.verbose {
        report::print_plan(&plan)?;
        println!();
    }

    let targets = plan
        .delete
        .into_iter()
        .filter(|path| pending.as_ref().map_or(true, |s| &s.id != path))
        .collect();
    let outcome = store::prune(targets, opts.dry_run).await;

    if opts.verbose || !outcome.is_clean() {
        report::print_prune_report(&outcome)?;
    }

    if !outcome.is_clean() {
        anyhow::bail!(
            "Failed to delete {}",
            util::plural(outcome.failed.len(), "snapshot")
        );
    }

    Ok(outcome)
}
