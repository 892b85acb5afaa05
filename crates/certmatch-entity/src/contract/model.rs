//! Contract entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use certmatch_core::types::{ApplicationId, CompanyId, ContractId, UserId};

use super::status::ContractStatus;

/// An engagement agreed between a company and an expert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Contract {
    /// Unique contract identifier.
    pub id: ContractId,
    /// Accepted application the contract came from (unique).
    pub application_id: ApplicationId,
    /// Contracting company.
    pub company_id: CompanyId,
    /// Contracted expert.
    pub expert_id: UserId,
    /// Fee in minor currency units.
    pub amount: i64,
    /// First day of the engagement.
    pub start_date: NaiveDate,
    /// Last day of the engagement.
    pub end_date: NaiveDate,
    /// Current status.
    pub status: ContractStatus,
    /// When the contract was drafted.
    pub created_at: DateTime<Utc>,
    /// When the contract was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to draft a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContract {
    /// Source application.
    pub application_id: ApplicationId,
    /// Company, copied from the application.
    pub company_id: CompanyId,
    /// Expert, copied from the application.
    pub expert_id: UserId,
    /// Fee.
    pub amount: i64,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date.
    pub end_date: NaiveDate,
}

/// Optional equality filters for listing contracts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractFilter {
    /// Only this company's contracts.
    pub company_id: Option<CompanyId>,
    /// Only this expert's contracts.
    pub expert_id: Option<UserId>,
    /// Only contracts in this status.
    pub status: Option<ContractStatus>,
}

impl ContractFilter {
    /// Whether the contract satisfies every present filter.
    pub fn matches(&self, contract: &Contract) -> bool {
        self.company_id.is_none_or(|id| contract.company_id == id)
            && self.expert_id.is_none_or(|id| contract.expert_id == id)
            && self.status.is_none_or(|s| contract.status == s)
    }
}
