//! Start the CertMatch server.

use clap::Args;

use certmatch_core::config::{AppConfig, DatabaseProvider};
use certmatch_core::error::AppError;
use certmatch_database::Stores;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Serve from process memory instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.database.provider = DatabaseProvider::Memory;
    }
    if args.no_migrate {
        config.database.run_migrations = false;
    }

    println!("Starting CertMatch server...");
    println!("  Address:  {}", config.server.bind_address());
    println!("  Provider: {}", config.database.provider);

    let stores = Stores::connect(&config.database).await?;
    certmatch_api::run_server(config, stores).await
}
