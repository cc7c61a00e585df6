//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use config::ConfigBuilder;
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`ARCHTOOL__SERVER__PORT`).
pub const ENV_PREFIX: &str = "ARCHTOOL";

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (`default.toml` + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage backend and connection pool settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Caller identity settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `{dir}/default.toml`, then `{dir}/{env}.toml`,
    /// then environment variables prefixed with `ARCHTOOL__`, and validate it.
    ///
    /// Missing files are skipped.
    pub fn load(dir: &str, env: &str) -> Result<Self, AppError> {
        let loaded = Self::read(dir, env)?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Like [`AppConfig::load`] but without validation, for callers that
    /// apply overrides first.
    pub fn read(dir: &str, env: &str) -> Result<Self, AppError> {
        Self::build(file_layers(dir, env).add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        ))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.backend == StoreBackend::Postgres && self.database.url.trim().is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.backend = \"postgres\"",
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::configuration(
                "database.min_connections must not exceed database.max_connections",
            ));
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        Ok(())
    }
}

/// `{dir}/default` overlaid by `{dir}/{env}`, both optional.
fn file_layers(dir: &str, env: &str) -> ConfigBuilder<DefaultState> {
    config::Config::builder()
        .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
        .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
}
