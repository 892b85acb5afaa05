//! User listing CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use certmatch_core::config::AppConfig;
use certmatch_core::error::AppError;
use certmatch_core::types::PageRequest;
use certmatch_database::UserStore;
use certmatch_entity::user::{User, UserRole};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users, newest first
    List {
        /// Filter by role (user, expert, company)
        #[arg(short, long)]
        role: Option<String>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Page size
        #[arg(long, default_value_t = 25)]
        per_page: u64,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Name
    name: String,
    /// Role
    role: String,
    /// Admin flag
    admin: bool,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            name: u.name.clone(),
            role: u.role.to_string(),
            admin: u.is_admin,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;

    match &args.command {
        UserCommand::List {
            role,
            page,
            per_page,
        } => {
            let role = role
                .as_deref()
                .map(str::parse::<UserRole>)
                .transpose()?;

            let result = stores
                .users
                .find_all(role, &PageRequest::new(*page, *per_page))
                .await?;

            let rows: Vec<UserRow> = result.items.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                output::print_kv(
                    "Page",
                    &format!("{}/{} ({} users)", result.page, result.total_pages, result.total_items),
                );
            }
        }
    }

    stores.close().await;
    Ok(())
}
