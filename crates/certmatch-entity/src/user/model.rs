//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use certmatch_core::types::UserId;

use super::role::UserRole;

/// A registered account: a plain user, an expert, or a company operator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique email address (compared case-insensitively).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Full name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Marketplace role.
    pub role: UserRole,
    /// Operator flag; admins may edit or delete any record.
    pub is_admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The credential-free projection of this user.
    pub fn summary(&self) -> UserSummary {
        UserSummary::from(self)
    }
}

/// Public projection of a user: never carries credential fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Full name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Full name.
    pub name: String,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Operator flag.
    pub is_admin: bool,
}

/// Data for updating an existing user's profile. `None` keeps the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New email address.
    pub email: Option<String>,
    /// New name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
}
