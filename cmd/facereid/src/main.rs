//! facereid CLI - inspect, check, repair and feed a face identity store.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{CheckCommand, ConfigCommand, InfoCommand, RepairCommand, ResolveCommand};

/// facereid CLI - inspect, check, repair and feed a face identity store.
///
/// The store is a flat L2 index (`faces.idx`) plus its label list
/// (`faces.txt`). Settings come from ~/.facereid/config.yaml and can be
/// overridden per invocation.
#[derive(Parser)]
#[command(name = "facereid")]
#[command(about = "Face identity store tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.facereid/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Index artifact path (labels live next to it with a .txt extension)
    #[arg(long, global = true)]
    pub index: Option<String>,

    /// Embedding dimension
    #[arg(long, global = true)]
    pub dim: Option<usize>,

    /// Match threshold (squared L2 distance, exclusive)
    #[arg(long, global = true)]
    pub threshold: Option<f32>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the effective configuration
    Config(ConfigCommand),
    /// Show store size and artifact locations
    Info(InfoCommand),
    /// Verify that the index and label list agree
    Check(CheckCommand),
    /// Truncate both artifacts to the shorter one
    Repair(RepairCommand),
    /// Resolve raw embeddings read as JSON lines
    Resolve(ResolveCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli),
        Commands::Info(cmd) => cmd.run(&cli),
        Commands::Check(cmd) => cmd.run(&cli),
        Commands::Repair(cmd) => cmd.run(&cli),
        Commands::Resolve(cmd) => cmd.run(&cli),
    }
}
