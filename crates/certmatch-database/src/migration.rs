//! Schema migrations embedded from the workspace `migrations/` directory.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{info, warn};

use certmatch_core::error::{AppError, ErrorKind};
use certmatch_core::result::AppResult;

/// Every migration shipped with this build.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Status of one embedded migration against a live database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Migration version (timestamp prefix of the file name).
    pub version: i64,
    /// Human readable description.
    pub description: String,
    /// Whether it has been applied.
    pub applied: bool,
}

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Running database migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed");
    Ok(())
}

/// List embedded migrations and whether each has been applied.
pub async fn migration_status(pool: &PgPool) -> AppResult<Vec<MigrationStatus>> {
    let applied: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success ORDER BY version")
            .fetch_all(pool)
            .await
            .or_else(|e| match e {
                // Table is created by the first run.
                sqlx::Error::Database(ref db) if db.code().as_deref() == Some("42P01") => {
                    Ok(Vec::new())
                }
                other => Err(AppError::with_source(
                    ErrorKind::Database,
                    "Failed to read applied migrations",
                    other,
                )),
            })?;

    Ok(MIGRATOR
        .iter()
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}

/// Drop every table and type in the `public` schema.
pub async fn reset_schema(pool: &PgPool) -> AppResult<()> {
    warn!("Dropping public schema");

    for statement in ["DROP SCHEMA public CASCADE", "CREATE SCHEMA public"] {
        sqlx::query(statement).execute(pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to reset schema", e)
        })?;
    }
    Ok(())
}
