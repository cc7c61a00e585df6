//! Configuration inspection commands.

use clap::{Args, Subcommand};

use archtool_core::config::StoreBackend;
use archtool_core::error::AppError;
use archtool_database::connection::mask_password;

use super::Cli;
use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = cli.read_config()?;
            config.database.url = mask_password(&config.database.url);
            config.auth.jwt_secret = "****".to_string();
            output::print_item(&config, cli.format);
        }
        ConfigCommand::Validate => {
            let config = cli.load_config()?;
            output::print_success(&format!(
                "Configuration in '{}' ({}) is valid",
                cli.config_dir, cli.env
            ));
            println!("  Server:  {}", config.server.bind_address());
            match config.database.backend {
                StoreBackend::Postgres => {
                    println!("  Store:   postgres {}", mask_password(&config.database.url))
                }
                StoreBackend::Memory => println!("  Store:   memory"),
            }
            println!("  Anonymous callers: {}", config.auth.allow_anonymous);
        }
    }
    Ok(())
}
