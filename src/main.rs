//! Artefactor - checksum ledger CLI
//!
//! CLI entry point that dispatches to subcommands.

use artefactor::cli::{Cli, Commands};
use artefactor::config::{ConfigManager, LogFormat};
use artefactor::error::ArtefactorResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> ArtefactorResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load()?;

    init_logging(cli.verbose, config.general.log_format);
    debug!("Loaded config from {}", config_manager.path().display());

    match cli.command {
        Commands::Update(args) => artefactor::cli::commands::update(args, &config),
        Commands::Check(args) => artefactor::cli::commands::check(args, &config),
        Commands::Show(args) => artefactor::cli::commands::show(args, &config),
        Commands::List(args) => artefactor::cli::commands::list(args, &config),
        Commands::Config(args) => {
            artefactor::cli::commands::config(args, &config, &config_manager)
        }
    }
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug. `RUST_LOG` wins if set.
fn init_logging(verbose: u8, format: LogFormat) {
    let default = match verbose {
        0 => "artefactor=warn",
        1 => "artefactor=info",
        _ => "artefactor=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.without_time().init(),
        LogFormat::Json => builder.json().init(),
    }
}
