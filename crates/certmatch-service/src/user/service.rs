//! Account registration, profile maintenance and actor resolution.

use std::sync::Arc;

use tracing::info;

use certmatch_auth::password::{PasswordHasher, PasswordValidator};
use certmatch_core::error::AppError;
use certmatch_core::result::AppResult;
use certmatch_core::types::{PageRequest, PageResponse, UserId};
use certmatch_database::store::UserStore;
use certmatch_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::context::RequestContext;

/// Data for registering a new account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterUser {
    /// Email address, unique ignoring case.
    pub email: String,
    /// Plaintext password, checked against the policy and hashed.
    pub password: String,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Marketplace role.
    pub role: UserRole,
}

/// Handles user accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Register a new account. Registration never grants admin rights.
    pub async fn register(&self, req: RegisterUser) -> AppResult<User> {
        let email = normalize_email(&req.email)?;
        let name = require_text(&req.name, "Name")?;
        self.validator.validate(&req.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(format!("Email '{email}' already in use")));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .users
            .create(&CreateUser {
                email,
                password_hash,
                name,
                phone: non_blank(req.phone),
                role: req.role,
                is_admin: false,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Fetch a user by id.
    pub async fn get(&self, id: UserId) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// List users newest first, optionally by role.
    pub async fn list(
        &self,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.users.find_all(role, &page).await
    }

    /// Update a profile. Only the user themself or an admin may do this.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        req: UpdateUser,
    ) -> AppResult<User> {
        ctx.require_self_or_admin(id, "account")?;

        let data = UpdateUser {
            email: req.email.as_deref().map(normalize_email).transpose()?,
            name: req
                .name
                .as_deref()
                .map(|name| require_text(name, "Name"))
                .transpose()?,
            phone: non_blank(req.phone),
        };

        if let Some(email) = &data.email {
            let taken = self
                .users
                .find_by_email(email)
                .await?
                .is_some_and(|existing| existing.id != id);
            if taken {
                return Err(AppError::conflict("Email already in use"));
            }
        }

        let user = self.users.update(id, &data).await?;
        info!(user_id = %id, actor = %ctx.user_id, "User profile updated");
        Ok(user)
    }

    /// Delete an account and everything it owns.
    pub async fn delete(&self, ctx: &RequestContext, id: UserId) -> AppResult<()> {
        ctx.require_self_or_admin(id, "account")?;

        if !self.users.delete(id).await? {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        info!(user_id = %id, actor = %ctx.user_id, "User deleted");
        Ok(())
    }

    /// Turn a gateway-asserted user id into a request context.
    pub async fn resolve_actor(&self, id: UserId) -> AppResult<RequestContext> {
        self.users
            .find_by_id(id)
            .await?
            .map(|user| RequestContext::for_user(&user))
            .ok_or_else(|| AppError::authentication(format!("Unknown actor {id}")))
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
            Ok(email.to_string())
        }
        _ => Err(AppError::validation(format!("Invalid email address: '{email}'"))),
    }
}

fn require_text(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
