//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mcpi - watch a Monte-Carlo estimate of pi converge in the browser
#[derive(Parser)]
#[command(
    name = "mcpi",
    about = "Monte-Carlo estimate of pi, plotted live in the browser",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sample random points and stream the plot to viewers
    Run(RunArgs),

    /// Print the effective configuration as YAML
    Config,
}

/// Arguments for `mcpi run`
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Number of points to sample
    #[arg(short = 'n', long, default_value_t = 100_000)]
    pub points: u64,

    /// Seed for reproducible sampling
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Listen address, overrides the config file
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Start sampling without waiting for a viewer
    #[arg(long)]
    pub no_wait: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            points: 100_000,
            seed: None,
            bind: None,
            no_wait: false,
        }
    }
}
