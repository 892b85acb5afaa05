//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use certmatch_core::config::AppConfig;
use certmatch_core::error::AppError;
use certmatch_database::connection::mask_password;

use crate::output::{self, OutputFormat};

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
    /// Show the effective configuration
    Show,
    /// Print a summary of the loaded configuration
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = mask_password(&shown.database.url);
            output::print_item(&shown, format);
        }
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration for '{env}' is valid"));
            output::print_kv("Server", &config.server.bind_address());
            output::print_kv("Provider", &config.database.provider.to_string());
            output::print_kv("Database", &mask_password(&config.database.url));
            output::print_kv("Log format", &config.logging.format);
        }
    }

    Ok(())
}
