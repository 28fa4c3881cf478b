//! Snapkeep CLI - snapkeep command

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cmd;
mod config;
mod report;
mod util;

use cmd::RunOptions;
use config::Overrides;

/// Snapkeep - timestamped rsync snapshots with grandfather-father-son pruning
#[derive(Parser)]
#[command(name = "snapkeep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Retention tier overrides
#[derive(Args, Debug, Clone)]
struct RetentionArgs {
    /// Most recent daily snapshots to keep (default: 7)
    #[arg(long)]
    days: Option<usize>,
    /// Most recent weeks to keep one snapshot for (default: 4)
    #[arg(long)]
    weeks: Option<usize>,
    /// Most recent months to keep one snapshot for (default: 12)
    #[arg(long)]
    months: Option<usize>,
    /// Most recent years to keep one snapshot for (default: 10)
    #[arg(long)]
    years: Option<usize>,
    /// Config file (default: ~/.config/snapkeep/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Reporting and safety flags
#[derive(Args, Debug, Clone, Copy)]
struct OutputArgs {
    /// Show what is kept and deleted before acting
    #[arg(short, long)]
    verbose: bool,
    /// Compute and report, but change nothing
    #[arg(short = 'd', long)]
    dry_run: bool,
}

impl From<OutputArgs> for RunOptions {
    fn from(args: OutputArgs) -> Self {
        RunOptions {
            verbose: args.verbose,
            dry_run: args.dry_run,
        }
    }
}

impl RetentionArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            days: self.days,
            weeks: self.weeks,
            months: self.months,
            years: self.years,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Snapshot SOURCE into DEST, then prune old snapshots
    Backup {
        /// Directory to back up
        source: PathBuf,
        /// Destination holding the snapshots
        dest: PathBuf,
        /// Arguments for rsync (default: -a)
        #[arg(short, long, allow_hyphen_values = true)]
        rsync: Option<String>,
        /// Name of the alias pointing at the latest snapshot (default: latest)
        #[arg(short, long)]
        latest: Option<String>,
        #[command(flatten)]
        retention: RetentionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Prune old snapshots in DEST without taking a new one
    Prune {
        /// Destination holding the snapshots
        dest: PathBuf,
        #[command(flatten)]
        retention: RetentionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show which snapshots would be kept (by tier) and deleted
    Plan {
        /// Destination holding the snapshots
        dest: PathBuf,
        #[command(flatten)]
        retention: RetentionArgs,
    },
    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    List {
        /// Config file to read instead of the default location
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the config file location
    Path {
        /// Create the file with defaults if it does not exist
        #[arg(long)]
        create: bool,
    },
    /// Print an example config file
    Example,
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Backup { output, .. } | Commands::Prune { output, .. } => output.verbose,
            Commands::Plan { .. } | Commands::Config(_) => false,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.command.verbose());

    match cli.command {
        Commands::Backup { source, dest, rsync, latest, retention, output } => {
            let overrides = Overrides {
                rsync_args: rsync,
                latest,
                ..retention.overrides()
            };
            cmd::backup::run(
                &source,
                &dest,
                retention.config.as_deref(),
                &overrides,
                output.into(),
            )
            .await
        }
        Commands::Prune { dest, retention, output } => {
            cmd::prune::run(&dest, retention.config.as_deref(), &retention.overrides(), output.into()).await
        }
        Commands::Plan { dest, retention } => {
            cmd::plan::run(&dest, retention.config.as_deref(), &retention.overrides()).await
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List { config } => cmd::config::run_list(config.as_deref()).await,
            ConfigCommands::Path { create } => cmd::config::run_path(create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
