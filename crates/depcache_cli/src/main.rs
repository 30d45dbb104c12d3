//! depcache CLI — incremental compiler dependency tracking for make builds.
//!
//! Provides `depcache check` to reconcile the dependency cache with fresh
//! compiler depfiles, `depcache clear` to delete depfiles of an abandoned
//! build step, and `depcache show` to inspect an internal dependency file.

#![warn(missing_docs)]

mod check;
mod clear;
mod show;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use depcache_config::{DependsConfig, CONFIG_FILE};
use tracing_subscriber::EnvFilter;

/// depcache — keeps make dependency files in sync with compiler depfiles.
#[derive(Parser, Debug)]
#[command(name = "depcache", version, about = "Compiler dependency cache for make")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Report every depfile that triggers a reparse, and enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a `depcache.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile the dependency cache and rewrite it if stale.
    Check(CheckArgs),
    /// Delete the depfiles named by a record batch.
    Clear(ClearArgs),
    /// Print an internal dependency file as JSON.
    Show(ShowArgs),
}

/// Arguments for the `depcache check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// JSON file listing the compile records.
    #[arg(long)]
    pub records: PathBuf,

    /// Internal dependency file (read, and rewritten when stale).
    #[arg(long)]
    pub internal: PathBuf,

    /// Make fragment to write when the cache is stale.
    #[arg(long)]
    pub make: PathBuf,

    /// Write both files even if the cache is up to date.
    #[arg(long)]
    pub force_write: bool,
}

/// Arguments for the `depcache clear` subcommand.
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// JSON file listing the compile records.
    #[arg(long)]
    pub records: PathBuf,
}

/// Arguments for the `depcache show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Internal dependency file to decode.
    #[arg(long)]
    pub internal: PathBuf,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
        Command::Clear(ref args) => clear::run(args, &global),
        Command::Show(ref args) => show::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flag-derived level.
fn init_logging(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(global)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn log_level(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "warn"
    } else if global.verbose {
        "debug"
    } else {
        "info"
    }
}

/// Loads the configuration named by `--config`, else `depcache.toml` in
/// `dir` if present, else the defaults.
pub(crate) fn resolve_config(
    global: &GlobalArgs,
    dir: &Path,
) -> Result<DependsConfig, depcache_config::ConfigError> {
    match &global.config {
        Some(path) => depcache_config::load_config_file(path),
        None if dir.join(CONFIG_FILE).is_file() => depcache_config::load_config(dir),
        None => Ok(DependsConfig::default()),
    }
}
