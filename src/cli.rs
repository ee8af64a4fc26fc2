//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// scopestats - summarize static analysis reports of SCOPE jobs
///
/// Reads every report of one kind in a folder and prints aggregate
/// counters and ratios.
///
/// Examples:
///   scopestats traces ./traces
///   scopestats savings ./traces --format json
///   scopestats passthrough ./out --ext .pt
///   scopestats exceptions ./logs --context-lines 10
///   scopestats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(subcommand_required = false, arg_required_else_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .scopestats.toml in the current directory
    #[arg(short, long, global = true, value_name = "FILE", env = "SCOPESTATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (no progress bar, errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// File name suffix selecting the reports to read
    ///
    /// Overrides the per-command default, e.g. --ext .trace
    #[arg(long, global = true, value_name = "SUFFIX")]
    pub ext: Option<String>,

    /// Generate a default .scopestats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Per-assembly analysis traces: method, column and timing statistics
    Traces(FolderArgs),
    /// Processor mapping files: unique processors per file
    Mappings(FolderArgs),
    /// Processors with savings, grouped across assemblies
    Savings(FolderArgs),
    /// Passthrough column reports
    Passthrough(FolderArgs),
    /// SARIF result files: analyzed processor classes
    Classes(FolderArgs),
    /// Analysis logs: first thrown exception per file
    Exceptions(ExceptionsArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct FolderArgs {
    /// Directory holding the reports
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExceptionsArgs {
    /// Directory holding the logs
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Lines printed after each thrown exception
    #[arg(long, value_name = "LINES")]
    pub context_lines: Option<usize>,
}

impl Command {
    pub fn dir(&self) -> &Path {
        match self {
            Command::Traces(a)
            | Command::Mappings(a)
            | Command::Savings(a)
            | Command::Passthrough(a)
            | Command::Classes(a) => &a.dir,
            Command::Exceptions(a) => &a.dir,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Traces(_) => "traces",
            Command::Mappings(_) => "mappings",
            Command::Savings(_) => "savings",
            Command::Passthrough(_) => "passthrough",
            Command::Classes(_) => "classes",
            Command::Exceptions(_) => "exceptions",
        }
    }
}

/// Output format for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Labeled lines (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        let command = self
            .command
            .as_ref()
            .ok_or_else(|| "A subcommand is required".to_string())?;

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref ext) = self.ext {
            if ext.is_empty() {
                return Err("Extension must not be empty".to_string());
            }
        }

        let dir = command.dir();
        if !dir.exists() {
            return Err(format!("Directory does not exist: {}", dir.display()));
        }
        if !dir.is_dir() {
            return Err(format!("Path is not a directory: {}", dir.display()));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
