//! Database migration management commands.

use clap::{Args, Subcommand};

use certmatch_core::config::AppConfig;
use certmatch_core::error::AppError;
use certmatch_database::migration;

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
    /// Show migration status
    Status,
    /// Reset database (drop the schema and re-run every migration)
    Reset {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let db = super::open_pool(config).await?;
    let pool = db.pool();

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            migration::run_migrations(pool).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Status => {
            println!("Migration status:");
            for entry in migration::migration_status(pool).await? {
                let state = if entry.applied { "applied" } else { "pending" };
                println!("  {} - {} ({})", entry.version, entry.description, state);
            }
        }
        MigrateCommand::Reset { force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("This will DROP all tables and re-run migrations. Continue?")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    output::print_warning("Cancelled.");
                    return Ok(());
                }
            }

            println!("Resetting database...");
            migration::reset_schema(pool).await?;
            migration::run_migrations(pool).await?;
            output::print_success("Database reset complete.");
        }
    }

    db.close().await;
    Ok(())
}
