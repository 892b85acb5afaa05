//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace roles. The set is closed; admin rights are a separate flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A plain account browsing the marketplace.
    User,
    /// A certification expert who receives applications.
    Expert,
    /// A company operator who owns a company profile.
    Company,
}

impl UserRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Expert => "expert",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = certmatch_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "expert" => Ok(Self::Expert),
            "company" => Ok(Self::Company),
            _ => Err(certmatch_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: user, expert, company"
            ))),
        }
    }
}
