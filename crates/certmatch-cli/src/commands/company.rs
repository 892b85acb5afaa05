//! Company search CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use certmatch_core::config::AppConfig;
use certmatch_core::error::AppError;
use certmatch_core::types::CompanyId;
use certmatch_entity::company::{CompanyWithOwner, SearchCriteria};
use certmatch_service::CompanyService;

use crate::output::{self, OutputFormat};

/// Arguments for company commands
#[derive(Debug, Args)]
pub struct CompanyArgs {
    /// Company subcommand
    #[command(subcommand)]
    pub command: CompanyCommand,
}

/// Company subcommands
#[derive(Debug, Subcommand)]
pub enum CompanyCommand {
    /// Search companies; omitted filters match everything
    Search {
        /// Industry substring, case-insensitive
        #[arg(long)]
        industry: Option<String>,
        /// Exact size category
        #[arg(long)]
        size: Option<String>,
        /// Address substring, case-insensitive
        #[arg(long)]
        location: Option<String>,
    },
    /// Show one company with its owner
    Show {
        /// Company ID
        id: String,
    },
}

/// Company display row for table output
#[derive(Debug, Serialize, Tabled)]
struct CompanyRow {
    /// Company ID
    id: String,
    /// Name
    name: String,
    /// Industry
    industry: String,
    /// Size
    size: String,
    /// Address
    address: String,
    /// Owner email
    owner: String,
}

impl From<&CompanyWithOwner> for CompanyRow {
    fn from(row: &CompanyWithOwner) -> Self {
        Self {
            id: row.company.id.to_string(),
            name: row.company.name.clone(),
            industry: row.company.industry.clone(),
            size: row.company.size.clone(),
            address: row.company.address.clone(),
            owner: row.user.email.clone(),
        }
    }
}

/// Execute company commands
pub async fn execute(
    args: &CompanyArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;
    let service = CompanyService::new(stores.companies.clone());

    match &args.command {
        CompanyCommand::Search {
            industry,
            size,
            location,
        } => {
            let criteria = SearchCriteria {
                industry: industry.clone(),
                size: size.clone(),
                location: location.clone(),
            };
            let companies = service.search(&criteria).await?;
            let rows: Vec<CompanyRow> = companies.iter().map(CompanyRow::from).collect();
            output::print_list(&rows, format);
        }
        CompanyCommand::Show { id } => {
            let id: CompanyId = id
                .parse()
                .map_err(|_| AppError::validation(format!("Invalid company id: '{id}'")))?;
            let company = service.get(id).await?;
            output::print_item(&company, format);
        }
    }

    stores.close().await;
    Ok(())
}
