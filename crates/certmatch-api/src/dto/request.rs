//! Request DTOs with validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use certmatch_core::types::{ApplicationId, CompanyId, UserId};
use certmatch_entity::application::{ApplicationStatus, CreateApplication};
use certmatch_entity::company::UpdateCompany;
use certmatch_entity::contract::ContractStatus;
use certmatch_entity::schedule::{CreateSchedule, UpdateSchedule};
use certmatch_entity::user::{UpdateUser, UserRole};
use certmatch_service::company::NewCompany;
use certmatch_service::contract::NewContract;
use certmatch_service::user::RegisterUser;

/// Account registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Full name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Phone number.
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    /// Marketplace role.
    pub role: UserRole,
}

impl From<RegisterUserRequest> for RegisterUser {
    fn from(req: RegisterUserRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            name: req.name,
            phone: req.phone,
            role: req.role,
        }
    }
}

/// Profile update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New email.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// New name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New phone number.
    #[validate(length(max = 30))]
    pub phone: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            email: req.email,
            name: req.name,
            phone: req.phone,
        }
    }
}

/// User listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    /// Only users with this role.
    pub role: Option<UserRole>,
}

/// Company registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Industry label.
    #[validate(length(min = 1, max = 100))]
    pub industry: String,
    /// Size category.
    #[validate(length(min = 1, max = 50))]
    pub size: String,
    /// Address.
    #[validate(length(min = 1, max = 500))]
    pub address: String,
}

impl From<CreateCompanyRequest> for NewCompany {
    fn from(req: CreateCompanyRequest) -> Self {
        Self {
            name: req.name,
            industry: req.industry,
            size: req.size,
            address: req.address,
        }
    }
}

/// Company update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    /// New name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// New industry.
    #[validate(length(min = 1, max = 100))]
    pub industry: Option<String>,
    /// New size category.
    #[validate(length(min = 1, max = 50))]
    pub size: Option<String>,
    /// New address.
    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,
}

impl From<UpdateCompanyRequest> for UpdateCompany {
    fn from(req: UpdateCompanyRequest) -> Self {
        Self {
            name: req.name,
            industry: req.industry,
            size: req.size,
            address: req.address,
        }
    }
}

/// Application submission request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    /// Applying company.
    pub company_id: CompanyId,
    /// Addressed expert.
    pub expert_id: UserId,
    /// Requested certification.
    #[validate(length(min = 1, max = 200))]
    pub certification: String,
    /// Cover message.
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

impl From<CreateApplicationRequest> for CreateApplication {
    fn from(req: CreateApplicationRequest) -> Self {
        Self {
            company_id: req.company_id,
            expert_id: req.expert_id,
            certification: req.certification,
            message: req.message,
        }
    }
}

/// Application status change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicationStatusRequest {
    /// Target status.
    pub status: ApplicationStatus,
}

/// Schedule creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateScheduleRequest {
    /// Owning application.
    pub application_id: ApplicationId,
    /// Title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Start of the window.
    pub starts_at: DateTime<Utc>,
    /// End of the window.
    pub ends_at: DateTime<Utc>,
    /// Location.
    #[validate(length(max = 500))]
    pub location: Option<String>,
    /// Free-form note.
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

impl From<CreateScheduleRequest> for CreateSchedule {
    fn from(req: CreateScheduleRequest) -> Self {
        Self {
            application_id: req.application_id,
            title: req.title,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            location: req.location,
            note: req.note,
        }
    }
}

/// Schedule update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateScheduleRequest {
    /// New title.
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    /// New start.
    pub starts_at: Option<DateTime<Utc>>,
    /// New end.
    pub ends_at: Option<DateTime<Utc>>,
    /// New location.
    #[validate(length(max = 500))]
    pub location: Option<String>,
    /// New note.
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

impl From<UpdateScheduleRequest> for UpdateSchedule {
    fn from(req: UpdateScheduleRequest) -> Self {
        Self {
            title: req.title,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            location: req.location,
            note: req.note,
        }
    }
}

/// Contract drafting request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateContractRequest {
    /// Accepted application the contract is for.
    pub application_id: ApplicationId,
    /// Amount in minor currency units.
    #[validate(range(min = 0, message = "Amount must not be negative"))]
    pub amount: i64,
    /// First day of the engagement.
    pub start_date: NaiveDate,
    /// Last day of the engagement.
    pub end_date: NaiveDate,
}

impl From<CreateContractRequest> for NewContract {
    fn from(req: CreateContractRequest) -> Self {
        Self {
            application_id: req.application_id,
            amount: req.amount,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// Contract status change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContractStatusRequest {
    /// Target status.
    pub status: ContractStatus,
}
