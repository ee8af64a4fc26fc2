//! scopestats - summaries of SCOPE static analysis reports
//!
//! Reads every report of one kind in a folder, folds the marker lines
//! into counters and prints the totals to stdout.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (bad arguments, unreadable folder, malformed report line)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::{Args, Command};
use config::Config;
use scanner::{FileScanner, ScanConfig};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    init_logging(&args);
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Run failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .scopestats.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            config::DEFAULT_CONFIG_FILE
        );
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", config::DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr; `RUST_LOG` overrides the level picked by the flags.
fn init_logging(args: &Args) {
    let level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber was already installed");
    }
}

/// Run one subcommand and print its summary.
fn run(args: &Args) -> Result<()> {
    let Some(command) = args.command.as_ref() else {
        anyhow::bail!("A subcommand is required");
    };

    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let dir = std::fs::canonicalize(command.dir())
        .with_context(|| format!("Failed to resolve {}", command.dir().display()))?;
    info!("Analyzing folder {} ({})", dir.display(), command.name());

    let extension = match command {
        Command::Traces(_) => &config.scan.traces_extension,
        Command::Mappings(_) => &config.scan.mappings_extension,
        Command::Savings(_) => &config.scan.savings_extension,
        Command::Passthrough(_) => &config.scan.passthrough_extension,
        Command::Classes(_) => &config.scan.classes_extension,
        Command::Exceptions(_) => &config.scan.exceptions_extension,
    };
    let file_scanner = FileScanner::new(dir, ScanConfig::new(extension.clone()));
    let progress = !args.quiet;
    let prefixes = &config.filters.generated_prefixes;

    let output = match command {
        Command::Traces(_) => {
            let summary = analysis::summarize_traces(&file_scanner, progress)?;
            report::render(&summary, args.format)?
        }
        Command::Mappings(_) => {
            let summary = analysis::summarize_mappings(&file_scanner, progress)?;
            report::render(&summary, args.format)?
        }
        Command::Savings(_) => {
            let summary = analysis::summarize_savings(
                &file_scanner,
                progress,
                &config.savings.generated_suffix,
            )?;
            report::render(&summary, args.format)?
        }
        Command::Passthrough(_) => {
            let summary = analysis::summarize_passthrough(&file_scanner, progress, prefixes)?;
            report::render(&summary, args.format)?
        }
        Command::Classes(_) => {
            let summary = analysis::summarize_classes(&file_scanner, progress, prefixes)?;
            report::render(&summary, args.format)?
        }
        Command::Exceptions(_) => {
            let summary = analysis::summarize_exceptions(
                &file_scanner,
                progress,
                config.exceptions.context_lines,
            )?;
            report::render(&summary, args.format)?
        }
    };

    print!("{}", output);
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
