//! Participant checks shared by applications, schedules and contracts.
//!
//! An application has two participants: the user owning the applying
//! company and the addressed expert. Schedules and contracts inherit the
//! participants of their application. Admins pass every check.

use certmatch_core::error::AppError;
use certmatch_core::result::AppResult;
use certmatch_core::types::{CompanyId, UserId};
use certmatch_database::store::CompanyStore;
use certmatch_entity::user::UserRole;

use crate::context::RequestContext;

/// The two sides of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participants {
    /// Applying company.
    pub company_id: CompanyId,
    /// User owning the applying company.
    pub company_owner: UserId,
    /// Addressed expert.
    pub expert_id: UserId,
}

impl Participants {
    /// Resolve the participants of an application-like record.
    pub async fn resolve(
        companies: &dyn CompanyStore,
        company_id: CompanyId,
        expert_id: UserId,
    ) -> AppResult<Self> {
        let company = companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Company {company_id} not found")))?;
        Ok(Self {
            company_id,
            company_owner: company.company.user_id,
            expert_id,
        })
    }

    /// Whether the actor is a participant or an admin.
    pub fn includes(&self, ctx: &RequestContext) -> bool {
        ctx.is_admin || ctx.user_id == self.company_owner || ctx.user_id == self.expert_id
    }

    /// Fail unless the actor is a participant or an admin.
    pub fn require_participant(&self, ctx: &RequestContext, what: &str) -> AppResult<()> {
        if self.includes(ctx) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only participants may access this {what}"
            )))
        }
    }

    /// Fail unless the actor owns the company or is an admin.
    pub fn require_company_side(&self, ctx: &RequestContext, action: &str) -> AppResult<()> {
        if ctx.is_self_or_admin(self.company_owner) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only the company owner may {action}"
            )))
        }
    }

    /// Fail unless the actor is the expert or an admin.
    pub fn require_expert_side(&self, ctx: &RequestContext, action: &str) -> AppResult<()> {
        if ctx.is_self_or_admin(self.expert_id) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only the addressed expert may {action}"
            )))
        }
    }
}

/// Which records a listing may return for the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Admins see everything.
    All,
    /// A company operator sees its company's records.
    Company(CompanyId),
    /// An expert sees records addressed to them.
    Expert(UserId),
    /// A company operator without a company sees nothing.
    Nothing,
}

impl ListScope {
    /// Work out the actor's listing scope.
    pub async fn for_actor(ctx: &RequestContext, companies: &dyn CompanyStore) -> AppResult<Self> {
        if ctx.is_admin {
            return Ok(Self::All);
        }
        match ctx.role {
            UserRole::Expert => Ok(Self::Expert(ctx.user_id)),
            UserRole::Company => Ok(companies
                .find_by_user(ctx.user_id)
                .await?
                .map_or(Self::Nothing, |c| Self::Company(c.id))),
            UserRole::User => Err(AppError::authorization(
                "Only companies, experts and admins may list marketplace records",
            )),
        }
    }

    /// Narrow requested company/expert filters to the scope. `None` means
    /// the request asks for records outside the scope.
    pub fn narrow(
        &self,
        company_id: Option<CompanyId>,
        expert_id: Option<UserId>,
    ) -> Option<(Option<CompanyId>, Option<UserId>)> {
        match *self {
            Self::All => Some((company_id, expert_id)),
            Self::Nothing => None,
            Self::Company(own) => match company_id {
                Some(requested) if requested != own => None,
                _ => Some((Some(own), expert_id)),
            },
            Self::Expert(own) => match expert_id {
                Some(requested) if requested != own => None,
                _ => Some((company_id, Some(own))),
            },
        }
    }
}
