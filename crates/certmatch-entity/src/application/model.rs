//! Application entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use certmatch_core::types::{ApplicationId, CompanyId, UserId};

use super::status::ApplicationStatus;

/// A company's request for certification support addressed to an expert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Application {
    /// Unique application identifier.
    pub id: ApplicationId,
    /// Applying company.
    pub company_id: CompanyId,
    /// Addressed expert.
    pub expert_id: UserId,
    /// Certification being pursued (e.g. "ISO 27001").
    pub certification: String,
    /// Free-form message to the expert.
    pub message: Option<String>,
    /// Current status.
    pub status: ApplicationStatus,
    /// When the application was submitted.
    pub created_at: DateTime<Utc>,
    /// When the application was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to submit an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplication {
    /// Applying company.
    pub company_id: CompanyId,
    /// Addressed expert.
    pub expert_id: UserId,
    /// Certification name.
    pub certification: String,
    /// Message to the expert.
    pub message: Option<String>,
}

/// Optional equality filters for listing applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationFilter {
    /// Only this company's applications.
    pub company_id: Option<CompanyId>,
    /// Only applications addressed to this expert.
    pub expert_id: Option<UserId>,
    /// Only applications in this status.
    pub status: Option<ApplicationStatus>,
}

impl ApplicationFilter {
    /// Whether the application satisfies every present filter.
    pub fn matches(&self, application: &Application) -> bool {
        self.company_id.is_none_or(|id| application.company_id == id)
            && self.expert_id.is_none_or(|id| application.expert_id == id)
            && self.status.is_none_or(|s| application.status == s)
    }
}
