//! Database migration management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use archtool_core::error::AppError;
use archtool_database::DatabasePool;
use archtool_database::migration;

use super::Cli;
use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show which embedded migrations have been applied
    Status,
}

/// One row of `migrate status`.
#[derive(Debug, Serialize, Tabled)]
struct MigrationRow {
    version: i64,
    description: String,
    applied: bool,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, cli: &Cli) -> Result<(), AppError> {
    let config = cli.load_config()?;
    let pool = DatabasePool::connect(&config.database).await?;

    let result = match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            migration::run_migrations(pool.pool()).await.map(|()| {
                output::print_success("All migrations applied successfully.");
            })
        }
        MigrateCommand::Status => {
            migration::applied_migrations(pool.pool())
                .await
                .map(|applied| {
                    let rows: Vec<MigrationRow> = migration::embedded_migrations()
                        .into_iter()
                        .map(|(version, description)| MigrationRow {
                            version,
                            description,
                            applied: applied.contains(&version),
                        })
                        .collect();
                    output::print_list(&rows, cli.format);
                })
        }
    };

    pool.close().await;
    result
}
