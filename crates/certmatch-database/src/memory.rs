//! In-memory store used by tests and the `memory` database provider.
//!
//! All tables live behind one [`RwLock`], so uniqueness checks and cascades
//! happen atomically under the write guard. Rows are kept in insertion
//! order, which the company search relies on for stable tie ordering.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use certmatch_core::error::AppError;
use certmatch_core::result::AppResult;
use certmatch_core::types::{
    ApplicationId, CompanyId, ContractId, PageRequest, PageResponse, ScheduleId, UserId,
};
use certmatch_entity::application::{
    Application, ApplicationFilter, ApplicationStatus, CreateApplication,
};
use certmatch_entity::company::{
    Company, CompanyPredicate, CompanyWithOwner, CreateCompany, UpdateCompany,
};
use certmatch_entity::contract::{Contract, ContractFilter, ContractStatus, CreateContract};
use certmatch_entity::schedule::{self, CreateSchedule, Schedule, UpdateSchedule};
use certmatch_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::store::{ApplicationStore, CompanyStore, ContractStore, ScheduleStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    companies: Vec<Company>,
    applications: Vec<Application>,
    schedules: Vec<Schedule>,
    contracts: Vec<Contract>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        let email = email.to_lowercase();
        self.users
            .iter()
            .any(|u| Some(u.id) != except && u.email.to_lowercase() == email)
    }

    fn with_owner(&self, company: &Company) -> Option<CompanyWithOwner> {
        self.users
            .iter()
            .find(|u| u.id == company.user_id)
            .map(|owner| CompanyWithOwner {
                company: company.clone(),
                user: owner.summary(),
            })
    }

    /// Drop applications (and their schedules and contracts) matching `doomed`.
    fn cascade_applications(&mut self, doomed: impl Fn(&Application) -> bool) {
        let removed: HashSet<ApplicationId> = self
            .applications
            .iter()
            .filter(|a| doomed(a))
            .map(|a| a.id)
            .collect();
        if removed.is_empty() {
            return;
        }
        self.applications.retain(|a| !removed.contains(&a.id));
        self.schedules
            .retain(|s| !removed.contains(&s.application_id));
        self.contracts
            .retain(|c| !removed.contains(&c.application_id));
    }

    fn cascade_companies(&mut self, doomed: impl Fn(&Company) -> bool) {
        let removed: HashSet<CompanyId> = self
            .companies
            .iter()
            .filter(|c| doomed(c))
            .map(|c| c.id)
            .collect();
        self.companies.retain(|c| !removed.contains(&c.id));
        self.cascade_applications(|a| removed.contains(&a.company_id));
    }
}

/// Process-local implementation of every store trait.
///
/// Cloning is cheap and clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every row.
    pub async fn clear(&self) {
        *self.tables.write().await = Tables::default();
    }
}

/// Newest first, matching the PostgreSQL `ORDER BY created_at DESC`.
fn newest_first<T: Clone>(rows: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    rows.iter().rev().filter(|r| keep(r)).cloned().collect()
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&data.email, None) {
            return Err(AppError::conflict(format!(
                "Email '{}' already in use",
                data.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            name: data.name.clone(),
            phone: data.phone.clone(),
            role: data.role,
            is_admin: data.is_admin,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        debug!(user_id = %user.id, "Inserted user into memory store");
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    async fn find_all(
        &self,
        role: Option<UserRole>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let tables = self.tables.read().await;
        let rows = newest_first(&tables.users, |u| role.is_none_or(|r| u.role == r));
        Ok(PageResponse::from_slice(rows, page))
    }

    async fn update(&self, id: UserId, data: &UpdateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if data
            .email
            .as_deref()
            .is_some_and(|email| tables.email_taken(email, Some(id)))
        {
            return Err(AppError::conflict("Email already in use"));
        }

        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        if let Some(email) = &data.email {
            user.email.clone_from(email);
        }
        if let Some(name) = &data.name {
            user.name.clone_from(name);
        }
        if data.phone.is_some() {
            user.phone.clone_from(&data.phone);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }
        tables.cascade_companies(|c| c.user_id == id);
        tables.cascade_applications(|a| a.expert_id == id);
        tables.contracts.retain(|c| c.expert_id != id);
        Ok(true)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.read().await.users.len() as u64)
    }
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn create(&self, data: &CreateCompany) -> AppResult<Company> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == data.user_id) {
            return Err(AppError::not_found(format!("User {} not found", data.user_id)));
        }
        if tables.companies.iter().any(|c| c.user_id == data.user_id) {
            return Err(AppError::conflict(format!(
                "User {} already has a company profile",
                data.user_id
            )));
        }

        let now = Utc::now();
        let company = Company {
            id: CompanyId::new(),
            user_id: data.user_id,
            name: data.name.clone(),
            industry: data.industry.clone(),
            size: data.size.clone(),
            address: data.address.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.companies.push(company.clone());
        Ok(company)
    }

    async fn find_by_id(&self, id: CompanyId) -> AppResult<Option<CompanyWithOwner>> {
        let tables = self.tables.read().await;
        Ok(tables
            .companies
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| tables.with_owner(c)))
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Company>> {
        let tables = self.tables.read().await;
        Ok(tables
            .companies
            .iter()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn update(&self, id: CompanyId, data: &UpdateCompany) -> AppResult<Company> {
        let mut tables = self.tables.write().await;
        let company = tables
            .companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Company {id} not found")))?;
        data.apply_to(company);
        company.updated_at = Utc::now();
        Ok(company.clone())
    }

    async fn delete(&self, id: CompanyId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let existed = tables.companies.iter().any(|c| c.id == id);
        tables.cascade_companies(|c| c.id == id);
        Ok(existed)
    }

    async fn find_many(&self, predicate: &CompanyPredicate) -> AppResult<Vec<CompanyWithOwner>> {
        let tables = self.tables.read().await;
        let joined: Vec<CompanyWithOwner> = tables
            .companies
            .iter()
            .filter_map(|c| tables.with_owner(c))
            .collect();
        Ok(predicate.apply(joined, |row| &row.company))
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn create(&self, data: &CreateApplication) -> AppResult<Application> {
        let mut tables = self.tables.write().await;
        if !tables.companies.iter().any(|c| c.id == data.company_id) {
            return Err(AppError::not_found(format!(
                "Company {} not found",
                data.company_id
            )));
        }
        if !tables.users.iter().any(|u| u.id == data.expert_id) {
            return Err(AppError::not_found(format!(
                "Expert {} not found",
                data.expert_id
            )));
        }

        let now = Utc::now();
        let application = Application {
            id: ApplicationId::new(),
            company_id: data.company_id,
            expert_id: data.expert_id,
            certification: data.certification.clone(),
            message: data.message.clone(),
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.applications.push(application.clone());
        Ok(application)
    }

    async fn find_by_id(&self, id: ApplicationId) -> AppResult<Option<Application>> {
        let tables = self.tables.read().await;
        Ok(tables.applications.iter().find(|a| a.id == id).cloned())
    }

    async fn find_all(
        &self,
        filter: &ApplicationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Application>> {
        let tables = self.tables.read().await;
        let rows = newest_first(&tables.applications, |a| filter.matches(a));
        Ok(PageResponse::from_slice(rows, page))
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> AppResult<Application> {
        let mut tables = self.tables.write().await;
        let application = tables
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(format!("Application {id} not found")))?;
        if application.status != from {
            return Err(AppError::conflict(format!(
                "Application {id} is '{}', expected '{from}'",
                application.status
            )));
        }
        application.status = to;
        application.updated_at = Utc::now();
        Ok(application.clone())
    }

    async fn delete(&self, id: ApplicationId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let existed = tables.applications.iter().any(|a| a.id == id);
        tables.cascade_applications(|a| a.id == id);
        Ok(existed)
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn create(&self, data: &CreateSchedule) -> AppResult<Schedule> {
        if !schedule::model::is_valid_window(data.starts_at, data.ends_at) {
            return Err(AppError::validation("ends_at must be after starts_at"));
        }
        let mut tables = self.tables.write().await;
        if !tables
            .applications
            .iter()
            .any(|a| a.id == data.application_id)
        {
            return Err(AppError::not_found(format!(
                "Application {} not found",
                data.application_id
            )));
        }

        let now = Utc::now();
        let entry = Schedule {
            id: ScheduleId::new(),
            application_id: data.application_id,
            title: data.title.clone(),
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            location: data.location.clone(),
            note: data.note.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.schedules.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_id(&self, id: ScheduleId) -> AppResult<Option<Schedule>> {
        let tables = self.tables.read().await;
        Ok(tables.schedules.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_application(&self, application_id: ApplicationId) -> AppResult<Vec<Schedule>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Schedule> = tables
            .schedules
            .iter()
            .filter(|s| s.application_id == application_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.starts_at);
        Ok(rows)
    }

    async fn update(&self, id: ScheduleId, data: &UpdateSchedule) -> AppResult<Schedule> {
        let mut tables = self.tables.write().await;
        let entry = tables
            .schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("Schedule {id} not found")))?;

        let mut updated = entry.clone();
        data.apply_to(&mut updated);
        if !schedule::model::is_valid_window(updated.starts_at, updated.ends_at) {
            return Err(AppError::validation("ends_at must be after starts_at"));
        }
        updated.updated_at = Utc::now();
        *entry = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: ScheduleId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.schedules.len();
        tables.schedules.retain(|s| s.id != id);
        Ok(tables.schedules.len() != before)
    }
}

#[async_trait]
impl ContractStore for MemoryStore {
    async fn create(&self, data: &CreateContract) -> AppResult<Contract> {
        if data.amount < 0 {
            return Err(AppError::validation("amount must not be negative"));
        }
        if data.end_date < data.start_date {
            return Err(AppError::validation("end_date must not be before start_date"));
        }
        let mut tables = self.tables.write().await;
        if !tables
            .applications
            .iter()
            .any(|a| a.id == data.application_id)
        {
            return Err(AppError::not_found(format!(
                "Application {} not found",
                data.application_id
            )));
        }
        if tables
            .contracts
            .iter()
            .any(|c| c.application_id == data.application_id)
        {
            return Err(AppError::conflict(format!(
                "Application {} already has a contract",
                data.application_id
            )));
        }

        let now = Utc::now();
        let contract = Contract {
            id: ContractId::new(),
            application_id: data.application_id,
            company_id: data.company_id,
            expert_id: data.expert_id,
            amount: data.amount,
            start_date: data.start_date,
            end_date: data.end_date,
            status: ContractStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        tables.contracts.push(contract.clone());
        Ok(contract)
    }

    async fn find_by_id(&self, id: ContractId) -> AppResult<Option<Contract>> {
        let tables = self.tables.read().await;
        Ok(tables.contracts.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_application(
        &self,
        application_id: ApplicationId,
    ) -> AppResult<Option<Contract>> {
        let tables = self.tables.read().await;
        Ok(tables
            .contracts
            .iter()
            .find(|c| c.application_id == application_id)
            .cloned())
    }

    async fn find_all(
        &self,
        filter: &ContractFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Contract>> {
        let tables = self.tables.read().await;
        let rows = newest_first(&tables.contracts, |c| filter.matches(c));
        Ok(PageResponse::from_slice(rows, page))
    }

    async fn update_status(
        &self,
        id: ContractId,
        from: ContractStatus,
        to: ContractStatus,
    ) -> AppResult<Contract> {
        let mut tables = self.tables.write().await;
        let contract = tables
            .contracts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Contract {id} not found")))?;
        if contract.status != from {
            return Err(AppError::conflict(format!(
                "Contract {id} is '{}', expected '{from}'",
                contract.status
            )));
        }
        contract.status = to;
        contract.updated_at = Utc::now();
        Ok(contract.clone())
    }

    async fn delete(&self, id: ContractId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.contracts.len();
        tables.contracts.retain(|c| c.id != id);
        Ok(tables.contracts.len() != before)
    }
}
