//! Company entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use certmatch_core::types::{CompanyId, UserId};

use crate::user::UserSummary;

/// A business profile owned by exactly one company-role user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Company {
    /// Unique company identifier.
    pub id: CompanyId,
    /// Owning user (one-to-one).
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Industry label, free text (e.g. "IT", "금융업").
    pub industry: String,
    /// Size category, stored verbatim (e.g. "SMALL", "SMALL_BUSINESS").
    pub size: String,
    /// Address / location.
    pub address: String,
    /// When the company was registered.
    pub created_at: DateTime<Utc>,
    /// When the company was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A company joined with the public projection of its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyWithOwner {
    /// The company row.
    #[serde(flatten)]
    pub company: Company,
    /// The owning user, without credentials.
    pub user: UserSummary,
}

/// Data required to register a company profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCompany {
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Industry label.
    pub industry: String,
    /// Size category.
    pub size: String,
    /// Address.
    pub address: String,
}

/// Partial update of a company profile. `None` keeps the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCompany {
    /// New display name.
    pub name: Option<String>,
    /// New industry label.
    pub industry: Option<String>,
    /// New size category.
    pub size: Option<String>,
    /// New address.
    pub address: Option<String>,
}

impl UpdateCompany {
    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.industry.is_none() && self.size.is_none() && self.address.is_none()
    }

    /// Apply the present fields onto an existing company.
    pub fn apply_to(&self, company: &mut Company) {
        if let Some(name) = &self.name {
            company.name.clone_from(name);
        }
        if let Some(industry) = &self.industry {
            company.industry.clone_from(industry);
        }
        if let Some(size) = &self.size {
            company.size.clone_from(size);
        }
        if let Some(address) = &self.address {
            company.address.clone_from(address);
        }
    }
}
