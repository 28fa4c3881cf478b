//! Take a new snapshot, then prune the destination

use super::{prune, RunOptions};
use crate::config::{self, Config, Overrides};
use crate::util;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use owo_colors::{OwoColorize, Stream::Stdout};
use retention::Snapshot;
use std::path::Path;
use store::{LatestAlias, SnapshotName, Transfer};

pub async fn run(
    source: &Path,
    dest: &Path,
    config_path: Option<&Path>,
    overrides: &Overrides,
    opts: RunOptions,
) -> Result<()> {
    let config = config::load(config_path)?.apply(overrides);
    config.validate().context("Invalid configuration")?;

    // The clock is read once; everything below works from this value
    let now = Local::now().naive_local();
    execute(source, dest, &config, opts, now).await
}

/// One full backup run at time `now`
///
/// A failed transfer leaves the alias where it was. Pruning still runs over
/// whatever the destination holds afterwards, and the transfer failure is
/// returned once pruning is done.
pub async fn execute(
    source: &Path,
    dest: &Path,
    config: &Config,
    opts: RunOptions,
    now: NaiveDateTime,
) -> Result<()> {
    if opts.dry_run {
        println!("{}", "Dry-run: nothing will be changed.".if_supports_color(Stdout, |t| t.yellow()));
    }

    let source = util::absolutize(source)?;
    let dest = util::absolutize(dest)?;

    if !source.is_dir() {
        anyhow::bail!("Source {} is not a directory", source.display());
    }

    let name = SnapshotName::at(now);
    let snapshot_dir = dest.join(&name);
    if snapshot_dir.exists() {
        anyhow::bail!("Snapshot {} already exists", snapshot_dir.display());
    }

    if opts.verbose {
        println!("{} {}", "Backing up to:".if_supports_color(Stdout, |t| t.bold()), snapshot_dir.display());
    }

    let alias = LatestAlias::new(&dest, &config.transfer.latest);
    let transfer = Transfer::new(&source, &snapshot_dir)
        .program(config.transfer.program.as_str())
        .extra_args(&config.transfer.args)?
        .link_from(alias.resolve());

    if opts.verbose {
        println!("{} {}", "Running:".if_supports_color(Stdout, |t| t.bold()), transfer.command_line().if_supports_color(Stdout, |t| t.dimmed()));
    }

    let mut transfer_error = None;
    if !opts.dry_run {
        match transfer.run().await {
            Ok(()) => {
                alias
                    .update(&snapshot_dir)
                    .with_context(|| format!("Failed to update {}", alias.path().display()))?;
                tracing::info!("Snapshot {} complete", name);
            }
            Err(e) => {
                println!("{} {}", "Transfer failed:".if_supports_color(Stdout, |t| t.red()), e);
                transfer_error = Some(e);
            }
        }
    }

    let pending = Snapshot::new(now.date(), snapshot_dir.clone());
    prune::prune_destination(&dest, &config.retention, Some(pending), opts).await?;

    match transfer_error {
        Some(e) => Err(anyhow::Error::new(e).context(format!("Backup {} incomplete", name))),
        None => Ok(()),
    }
}
