//! Fixtures for service tests, backed by the in-memory store.

use std::sync::Arc;

use certmatch_auth::password::{PasswordHasher, PasswordValidator};
use certmatch_core::config::AuthConfig;
use certmatch_database::{MemoryStore, Stores};
use certmatch_entity::company::{Company, CreateCompany};
use certmatch_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;
use crate::{ApplicationService, CompanyService, ContractService, ScheduleService, UserService};

pub(crate) struct Fixture {
    pub stores: Stores,
    pub users: UserService,
    pub companies: CompanyService,
    pub applications: ApplicationService,
    pub schedules: ScheduleService,
    pub contracts: ContractService,
}

impl Fixture {
    pub fn new() -> Self {
        let stores = Stores::memory(MemoryStore::new());
        Self {
            users: UserService::new(
                stores.users.clone(),
                Arc::new(PasswordHasher::new()),
                Arc::new(PasswordValidator::new(&AuthConfig::default())),
            ),
            companies: CompanyService::new(stores.companies.clone()),
            applications: ApplicationService::new(
                stores.applications.clone(),
                stores.companies.clone(),
                stores.users.clone(),
            ),
            schedules: ScheduleService::new(
                stores.schedules.clone(),
                stores.applications.clone(),
                stores.companies.clone(),
            ),
            contracts: ContractService::new(
                stores.contracts.clone(),
                stores.applications.clone(),
                stores.companies.clone(),
            ),
            stores,
        }
    }

    /// Insert a user directly, skipping password hashing.
    pub async fn user(&self, email: &str, role: UserRole) -> (User, RequestContext) {
        let user = self
            .stores
            .users
            .create(&CreateUser {
                email: email.to_string(),
                password_hash: "unused".to_string(),
                name: email.to_string(),
                phone: None,
                role,
                is_admin: false,
            })
            .await
            .unwrap();
        let ctx = RequestContext::for_user(&user);
        (user, ctx)
    }

    pub fn admin() -> RequestContext {
        RequestContext::new(certmatch_core::types::UserId::new(), UserRole::User, true)
    }

    /// A company-role user with a registered company.
    pub async fn company(&self, email: &str, name: &str) -> (Company, RequestContext) {
        let (user, ctx) = self.user(email, UserRole::Company).await;
        let company = self
            .stores
            .companies
            .create(&CreateCompany {
                user_id: user.id,
                name: name.to_string(),
                industry: "IT".to_string(),
                size: "SMALL".to_string(),
                address: "Seoul".to_string(),
            })
            .await
            .unwrap();
        (company, ctx)
    }
}
