//! Contract status and its transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a contract.
///
/// ```text
/// draft ──► signed ──► completed
///   │         │
///   └─────────┴──────► cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contract_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    /// Terms proposed, not yet binding.
    Draft,
    /// Both parties agreed.
    Signed,
    /// Engagement delivered.
    Completed,
    /// Called off before completion.
    Cancelled,
}

impl ContractStatus {
    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Signed | Self::Cancelled)
                | (Self::Signed, Self::Completed | Self::Cancelled)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Signed => "signed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = certmatch_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "signed" => Ok(Self::Signed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(certmatch_core::AppError::validation(format!(
                "Invalid contract status: '{s}'. Expected one of: draft, signed, completed, cancelled"
            ))),
        }
    }
}
