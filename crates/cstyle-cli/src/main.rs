//! cstyle CLI tool.
//!
//! Usage:
//! ```bash
//! cstyle check [OPTIONS]
//! cstyle list-rules
//! cstyle init
//! cstyle makefile [PATH]
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Style checker for C programming exercises
#[derive(Parser)]
#[command(name = "cstyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CSTYLE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the code style of C sources
    Check(CheckArgs),

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Check the Makefile for a `mytests` target and add missing test markers
    Makefile {
        /// Makefile to check
        #[arg(default_value = "Makefile")]
        path: PathBuf,
    },
}

/// Options of the `check` command. Unset options fall back to the
/// configuration file, then to the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Maximum line length (includes comments and strings!) [default: 100]
    #[arg(long)]
    pub max_line_length: Option<usize>,

    /// Maximum number of lines per function (does not count blank lines and
    /// comments) [default: 60]
    #[arg(long)]
    pub max_function_lines: Option<usize>,

    /// Directory to search c-, h- and ts-files in [default: .]
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Comma-separated list of files to check (the directory is not searched)
    #[arg(long, value_delimiter = ',')]
    pub files: Vec<PathBuf>,

    /// Comma-separated list of files to ignore
    #[arg(long, value_delimiter = ',')]
    pub whitelist: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Only run specific rules (comma-separated names or codes)
    #[arg(long, value_delimiter = ',')]
    pub rules: Vec<String>,

    /// Rule preset: standard or exercise [default: standard]
    #[arg(long)]
    pub preset: Option<String>,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check(args) => commands::check::run(&args, cli.config.as_deref()),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
        Commands::Makefile { path } => commands::makefile::run(&path),
    }
}
