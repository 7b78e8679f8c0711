//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// devbuild - development build server
///
/// Lays out IDE products from compiled module output and keeps the layout in
/// sync with what is on disk.
#[derive(Parser, Debug)]
#[command(name = "devbuild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project home containing build/ and out/ (defaults to current directory)
    #[arg(long, global = true, env = "DEVBUILD_HOME")]
    pub home: Option<PathBuf>,

    /// Product configuration file (defaults to <home>/build/dev-build-server.json)
    #[arg(short, long, global = true, env = "DEVBUILD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List configured products
    Products(ProductsArgs),

    /// Build or re-validate products by platform prefix
    Build(BuildArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the products command
#[derive(Parser, Debug)]
pub struct ProductsArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Platform prefixes, in request order (repeat one to re-validate it)
    #[arg(required = true)]
    pub prefixes: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the parsed configuration as JSON
    Show,

    /// Show configuration file path
    Path,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
