//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use certmatch_auth::password::{PasswordHasher, PasswordValidator};
use certmatch_core::config::AppConfig;
use certmatch_database::Stores;
use certmatch_service::{
    ApplicationService, CompanyService, ContractService, ScheduleService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store handles for the configured provider
    pub stores: Stores,

    // ── Services ─────────────────────────────────────────────
    /// User accounts and actor resolution
    pub user_service: Arc<UserService>,
    /// Company profiles and search
    pub company_service: Arc<CompanyService>,
    /// Certification applications
    pub application_service: Arc<ApplicationService>,
    /// Application schedules
    pub schedule_service: Arc<ScheduleService>,
    /// Contracts
    pub contract_service: Arc<ContractService>,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wire every service onto the given stores.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));

        let user_service = UserService::new(stores.users.clone(), hasher, validator);
        let company_service = CompanyService::new(stores.companies.clone());
        let application_service = ApplicationService::new(
            stores.applications.clone(),
            stores.companies.clone(),
            stores.users.clone(),
        );
        let schedule_service = ScheduleService::new(
            stores.schedules.clone(),
            stores.applications.clone(),
            stores.companies.clone(),
        );
        let contract_service = ContractService::new(
            stores.contracts.clone(),
            stores.applications.clone(),
            stores.companies.clone(),
        );

        Self {
            config: Arc::new(config),
            stores,
            user_service: Arc::new(user_service),
            company_service: Arc::new(company_service),
            application_service: Arc::new(application_service),
            schedule_service: Arc::new(schedule_service),
            contract_service: Arc::new(contract_service),
            started_at: Instant::now(),
        }
    }
}
