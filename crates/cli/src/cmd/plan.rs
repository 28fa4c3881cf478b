//! Show what the retention policy would keep and delete

use super::{prune, RunOptions};
use crate::config::{self, Overrides};
use crate::util;
use anyhow::{Context, Result};
use std::path::Path;

pub async fn run(dest: &Path, config_path: Option<&Path>, overrides: &Overrides) -> Result<()> {
    let config = config::load(config_path)?.apply(overrides);
    config.validate().context("Invalid configuration")?;

    let dest = util::absolutize(dest)?;
    let opts = RunOptions {
        verbose: true,
        dry_run: true,
    };
    prune::prune_destination(&dest, &config.retention, None, opts).await?;
    Ok(())
}
