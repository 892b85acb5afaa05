//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use certmatch_core::error::AppError;
use certmatch_core::types::UserId;
use certmatch_entity::user::{User, UserRole};

/// Who is acting on the current request.
///
/// Built by the API from the gateway-asserted user id and passed into
/// service methods so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The acting user's marketplace role.
    pub role: UserRole,
    /// Whether the actor has operator rights.
    pub is_admin: bool,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for an explicit identity.
    pub fn new(user_id: UserId, role: UserRole, is_admin: bool) -> Self {
        Self {
            user_id,
            role,
            is_admin,
            request_time: Utc::now(),
        }
    }

    /// Creates a context acting as the given user.
    pub fn for_user(user: &User) -> Self {
        Self::new(user.id, user.role, user.is_admin)
    }

    /// Whether the actor is `owner` or an admin.
    pub fn is_self_or_admin(&self, owner: UserId) -> bool {
        self.is_admin || self.user_id == owner
    }

    /// Fail unless the actor has the given role. Admins always pass.
    pub fn require_role(&self, role: UserRole) -> Result<(), AppError> {
        if self.is_admin || self.role == role {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "This action requires the '{role}' role"
            )))
        }
    }

    /// Fail unless the actor is `owner` or an admin.
    pub fn require_self_or_admin(&self, owner: UserId, what: &str) -> Result<(), AppError> {
        if self.is_self_or_admin(owner) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only the owner or an admin may modify this {what}"
            )))
        }
    }
}
