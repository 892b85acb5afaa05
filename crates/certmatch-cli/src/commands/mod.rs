//! CLI command definitions and dispatch.

pub mod company;
pub mod config;
pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use certmatch_core::config::AppConfig;
use certmatch_core::error::AppError;
use certmatch_database::{DatabasePool, Stores};

use crate::output::OutputFormat;

/// CertMatch: certification expert marketplace
#[derive(Debug, Parser)]
#[command(name = "certmatch", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to apply (config/{env}.toml)
    #[arg(short, long, env = "CERTMATCH_ENV", default_value = "development")]
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
    /// Start the CertMatch server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Company search and inspection
    Company(company::CompanyArgs),
    /// User listing
    User(user::UserArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Company(args) => company::execute(args, &config, self.format).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, &self.env, self.format),
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(&self.config_dir, &self.env)
    }
}

/// Helper: open the configured stores without running migrations.
pub async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    let mut database = config.database.clone();
    database.run_migrations = false;
    Stores::connect(&database).await
}

/// Helper: open a PostgreSQL pool regardless of the configured provider.
pub async fn open_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
