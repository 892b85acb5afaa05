//! Store traits: the persistence seam between services and a backend.
//!
//! Every method maps backend failures into [`AppError`]: unique violations
//! become `Conflict`, missing parents become `NotFound`, anything else is
//! a `Database` error carrying the backend cause.
//!
//! [`AppError`]: certmatch_core::AppError

use std::fmt::Debug;

use async_trait::async_trait;

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
use certmatch_entity::schedule::{CreateSchedule, Schedule, UpdateSchedule};
use certmatch_entity::user::{CreateUser, UpdateUser, User, UserRole};

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Insert a user. A duplicate email (any case) is a conflict.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List users newest first, optionally restricted to one role.
    async fn find_all(
        &self,
        role: Option<UserRole>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>>;

    /// Apply a partial profile update.
    async fn update(&self, id: UserId, data: &UpdateUser) -> AppResult<User>;

    /// Delete a user and everything hanging off it. Returns whether a row
    /// was removed.
    async fn delete(&self, id: UserId) -> AppResult<bool>;

    /// Total number of users.
    async fn count(&self) -> AppResult<u64>;
}

/// Persistence for company profiles.
#[async_trait]
pub trait CompanyStore: Send + Sync + Debug {
    /// Insert a company. A second company for the same user is a conflict.
    async fn create(&self, data: &CreateCompany) -> AppResult<Company>;

    /// Find a company together with its owner.
    async fn find_by_id(&self, id: CompanyId) -> AppResult<Option<CompanyWithOwner>>;

    /// Find the company owned by a user.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Company>>;

    /// Apply a partial update.
    async fn update(&self, id: CompanyId, data: &UpdateCompany) -> AppResult<Company>;

    /// Delete a company. Returns whether a row was removed.
    async fn delete(&self, id: CompanyId) -> AppResult<bool>;

    /// Every company satisfying the predicate, in the predicate's order,
    /// each joined with its owner.
    async fn find_many(&self, predicate: &CompanyPredicate) -> AppResult<Vec<CompanyWithOwner>>;
}

/// Persistence for certification applications.
#[async_trait]
pub trait ApplicationStore: Send + Sync + Debug {
    /// Insert an application in `pending` status.
    async fn create(&self, data: &CreateApplication) -> AppResult<Application>;

    /// Find an application by primary key.
    async fn find_by_id(&self, id: ApplicationId) -> AppResult<Option<Application>>;

    /// List applications newest first.
    async fn find_all(
        &self,
        filter: &ApplicationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Application>>;

    /// Move the status from `from` to `to`. Fails with `Conflict` when the
    /// stored status is no longer `from`. Transition rules are checked by
    /// the caller.
    async fn update_status(
        &self,
        id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> AppResult<Application>;

    /// Delete an application with its schedules and contract.
    async fn delete(&self, id: ApplicationId) -> AppResult<bool>;
}

/// Persistence for schedule entries.
#[async_trait]
pub trait ScheduleStore: Send + Sync + Debug {
    /// Insert a schedule entry.
    async fn create(&self, data: &CreateSchedule) -> AppResult<Schedule>;

    /// Find a schedule entry by primary key.
    async fn find_by_id(&self, id: ScheduleId) -> AppResult<Option<Schedule>>;

    /// Entries of one application ordered by start time.
    async fn find_by_application(&self, application_id: ApplicationId) -> AppResult<Vec<Schedule>>;

    /// Apply a partial update.
    async fn update(&self, id: ScheduleId, data: &UpdateSchedule) -> AppResult<Schedule>;

    /// Delete a schedule entry.
    async fn delete(&self, id: ScheduleId) -> AppResult<bool>;
}

/// Persistence for contracts.
#[async_trait]
pub trait ContractStore: Send + Sync + Debug {
    /// Insert a `draft` contract. One contract per application.
    async fn create(&self, data: &CreateContract) -> AppResult<Contract>;

    /// Find a contract by primary key.
    async fn find_by_id(&self, id: ContractId) -> AppResult<Option<Contract>>;

    /// Find the contract drawn up from an application.
    async fn find_by_application(
        &self,
        application_id: ApplicationId,
    ) -> AppResult<Option<Contract>>;

    /// List contracts newest first.
    async fn find_all(
        &self,
        filter: &ContractFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Contract>>;

    /// Move the status from `from` to `to`. Fails with `Conflict` when the
    /// stored status is no longer `from`.
    async fn update_status(
        &self,
        id: ContractId,
        from: ContractStatus,
        to: ContractStatus,
    ) -> AppResult<Contract>;

    /// Delete a contract.
    async fn delete(&self, id: ContractId) -> AppResult<bool>;
}
