//! ArchTool diagram server.
//!
//! Main entry point that wires the crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use archtool_core::config::{AppConfig, StoreBackend};
use archtool_core::error::AppError;
use archtool_database::Stores;
use archtool_database::connection::mask_password;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `ARCHTOOL_CONFIG_DIR` for `ARCHTOOL_ENV`
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("ARCHTOOL_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("ARCHTOOL_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ArchTool diagram server v{}", env!("CARGO_PKG_VERSION"));

    match config.database.backend {
        StoreBackend::Postgres => tracing::info!(
            url = %mask_password(&config.database.url),
            "Connecting to database..."
        ),
        StoreBackend::Memory => tracing::info!("Using in-memory store"),
    }
    let stores = Stores::connect(&config.database).await?;

    archtool_api::run_server(config, stores).await
}
