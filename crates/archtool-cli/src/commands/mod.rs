//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use archtool_core::config::AppConfig;
use archtool_core::error::AppError;

use crate::output::OutputFormat;

/// ArchTool diagram backend
#[derive(Debug, Parser)]
#[command(name = "archtool", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and per-environment overrides
    #[arg(long, env = "ARCHTOOL_CONFIG_DIR", default_value = "config")]
    pub config_dir: String,

    /// Environment whose `{env}.toml` is layered over the defaults
    #[arg(long, env = "ARCHTOOL_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the diagram server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self).await,
            Commands::Migrate(args) => migrate::execute(args, self).await,
            Commands::Config(args) => config::execute(args, self),
        }
    }

    /// Load configuration from the selected directory and environment
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config_dir, &self.env)
    }

    /// Load configuration without validating it
    pub fn read_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::read(&self.config_dir, &self.env)
    }
}
