//! Start the diagram server.

use clap::Args;

use archtool_core::config::StoreBackend;
use archtool_core::error::AppError;
use archtool_database::Stores;

use super::Cli;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Use the in-memory store instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, cli: &Cli) -> Result<(), AppError> {
    let mut config = cli.read_config()?;

    if args.memory {
        config.database.backend = StoreBackend::Memory;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.no_migrate {
        config.database.run_migrations = false;
    }
    config.validate()?;

    println!("Starting diagram server...");
    println!("  Address: {}", config.server.bind_address());
    println!("  Store:   {:?}", config.database.backend);

    let stores = Stores::connect(&config.database).await?;
    archtool_api::run_server(config, stores).await
}
