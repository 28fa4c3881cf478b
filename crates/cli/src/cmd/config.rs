//! Configuration management command
//!
//! Shows the effective configuration, the config file location, and an
//! example file.

use crate::config;
use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream::Stdout};
use std::path::Path;

/// List all effective configuration values
pub async fn run_list(config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;
    let location = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => config::config_file_path().filter(|path| path.exists()),
    };

    println!("{}", "Snapkeep Configuration".if_supports_color(Stdout, |t| t.bold()));
    match &location {
        Some(path) => println!("{}: {}\n", "Location".if_supports_color(Stdout, |t| t.dimmed()), path.display().if_supports_color(Stdout, |t| t.dimmed())),
        None => println!("{}: {}\n", "Location".if_supports_color(Stdout, |t| t.dimmed()), "built-in defaults".if_supports_color(Stdout, |t| t.dimmed())),
    }

    println!("{}", "[retention]".if_supports_color(Stdout, |t| t.yellow()));
    for tier in config.retention.tiers() {
        println!(
            "  {} = {}",
            tier.granularity.tier_name().if_supports_color(Stdout, |t| t.cyan()),
            tier.count
        );
    }

    println!("\n{}", "[transfer]".if_supports_color(Stdout, |t| t.yellow()));
    println!("  {} = {}", "program".if_supports_color(Stdout, |t| t.cyan()), config.transfer.program);
    println!("  {} = {}", "args".if_supports_color(Stdout, |t| t.cyan()), config.transfer.args);
    println!("  {} = {}", "latest".if_supports_color(Stdout, |t| t.cyan()), config.transfer.latest);

    if let Err(e) = config.validate() {
        println!("\n{} {:#}", "Invalid:".if_supports_color(Stdout, |t| t.red()), e);
    }

    println!("\n{}", "Valid Ranges:".if_supports_color(Stdout, |t| t.bold()));
    println!("  days, weeks, months, years: 0-{} (0 disables the tier)", retention::MAX_TIER_COUNT);

    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        config::init_if_missing(&config_path)?;
        println!("{} Created config file at: {}", "✓".if_supports_color(Stdout, |t| t.green()), config_path.display());
    } else {
        println!("{}", config_path.display());
        if !config_path.exists() {
            println!("{}", "File does not exist. Use --create to create it.".if_supports_color(Stdout, |t| t.yellow()));
        }
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}
