//! devbuild - development build server
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use devbuild::cli::args::LogFormat;
use devbuild::cli::{Cli, Commands};
use devbuild::config::ConfigManager;
use devbuild::error::{DevBuildError, DevBuildResult};
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

fn run() -> DevBuildResult<()> {
    let cli = Cli::parse();

    // 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("devbuild=warn"),
        1 => EnvFilter::new("devbuild=info"),
        _ => EnvFilter::new("devbuild=debug"),
    };

    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    let home = match cli.home {
        Some(home) => home,
        None => std::env::current_dir()
            .map_err(|e| DevBuildError::io("getting current directory", e))?,
    };
    debug!("Project home: {}", home.display());

    let config_manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::for_home(&home),
    };

    // Config command reads the file itself (path needs no valid config)
    if let Commands::Config(args) = cli.command {
        return devbuild::cli::commands::config(args, &config_manager);
    }

    let config = config_manager.load()?;

    match cli.command {
        Commands::Config(_) => unreachable!("Config handled above"),
        Commands::Products(args) => devbuild::cli::commands::products(args, &config),
        Commands::Build(args) => devbuild::cli::commands::build(args, &home, config),
    }
}
