//! Application submission, review and withdrawal.

use std::sync::Arc;

use tracing::info;

use certmatch_core::error::AppError;
use certmatch_core::result::AppResult;
use certmatch_core::types::{ApplicationId, CompanyId, PageRequest, PageResponse, UserId};
use certmatch_database::store::{ApplicationStore, CompanyStore, UserStore};
use certmatch_entity::application::{
    Application, ApplicationFilter, ApplicationStatus, CreateApplication,
};
use certmatch_entity::user::UserRole;

use crate::access::{ListScope, Participants};
use crate::context::RequestContext;

/// Requested filters for an application listing.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ApplicationQuery {
    /// Only this company's applications.
    pub company_id: Option<CompanyId>,
    /// Only applications addressed to this expert.
    pub expert_id: Option<UserId>,
    /// Only applications in this status.
    pub status: Option<ApplicationStatus>,
}

/// Handles certification applications.
#[derive(Debug, Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationStore>,
    companies: Arc<dyn CompanyStore>,
    users: Arc<dyn UserStore>,
}

impl ApplicationService {
    /// Creates a new application service.
    pub fn new(
        applications: Arc<dyn ApplicationStore>,
        companies: Arc<dyn CompanyStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            applications,
            companies,
            users,
        }
    }

    /// Submit an application from the actor's company to an expert.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateApplication,
    ) -> AppResult<Application> {
        let company = self
            .companies
            .find_by_id(req.company_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Company {} not found", req.company_id)))?;
        ctx.require_self_or_admin(company.company.user_id, "company")?;

        let expert = self
            .users
            .find_by_id(req.expert_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Expert {} not found", req.expert_id)))?;
        if expert.role != UserRole::Expert {
            return Err(AppError::validation(format!(
                "User {} is not an expert",
                req.expert_id
            )));
        }

        let certification = req.certification.trim();
        if certification.is_empty() {
            return Err(AppError::validation("Certification must not be blank"));
        }

        let application = self
            .applications
            .create(&CreateApplication {
                certification: certification.to_string(),
                message: req.message.filter(|m| !m.trim().is_empty()),
                ..req
            })
            .await?;

        info!(
            application_id = %application.id,
            company_id = %application.company_id,
            expert_id = %application.expert_id,
            "Application submitted"
        );
        Ok(application)
    }

    /// Fetch an application. Participants and admins only.
    pub async fn get(&self, ctx: &RequestContext, id: ApplicationId) -> AppResult<Application> {
        let (application, participants) = self.load(id).await?;
        participants.require_participant(ctx, "application")?;
        Ok(application)
    }

    /// List the applications the actor may see, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: ApplicationQuery,
        page: PageRequest,
    ) -> AppResult<PageResponse<Application>> {
        let scope = ListScope::for_actor(ctx, self.companies.as_ref()).await?;
        let Some((company_id, expert_id)) = scope.narrow(query.company_id, query.expert_id) else {
            return Ok(PageResponse::new(Vec::new(), page.page, page.page_size, 0));
        };

        let filter = ApplicationFilter {
            company_id,
            expert_id,
            status: query.status,
        };
        self.applications.find_all(&filter, &page).await
    }

    /// Move an application to a new status.
    ///
    /// The expert (or an admin) accepts or rejects; the company owner (or
    /// an admin) withdraws. Only pending applications change.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        id: ApplicationId,
        next: ApplicationStatus,
    ) -> AppResult<Application> {
        let (application, participants) = self.load(id).await?;
        participants.require_participant(ctx, "application")?;

        match next {
            ApplicationStatus::Accepted | ApplicationStatus::Rejected => {
                participants.require_expert_side(ctx, "accept or reject an application")?
            }
            ApplicationStatus::Withdrawn => {
                participants.require_company_side(ctx, "withdraw an application")?
            }
            ApplicationStatus::Pending => {}
        }

        if !application.status.can_transition_to(next) {
            return Err(AppError::conflict(format!(
                "Application {id} cannot move from '{}' to '{next}'",
                application.status
            )));
        }

        let updated = self
            .applications
            .update_status(id, application.status, next)
            .await?;
        info!(
            application_id = %id,
            from = %application.status,
            to = %next,
            actor = %ctx.user_id,
            "Application status changed"
        );
        Ok(updated)
    }

    /// Delete an application. The company owner may delete while it is
    /// pending; admins always.
    pub async fn delete(&self, ctx: &RequestContext, id: ApplicationId) -> AppResult<()> {
        let (application, participants) = self.load(id).await?;
        participants.require_company_side(ctx, "delete an application")?;

        if !ctx.is_admin && application.status != ApplicationStatus::Pending {
            return Err(AppError::conflict(format!(
                "Application {id} is '{}' and can no longer be deleted",
                application.status
            )));
        }

        self.applications.delete(id).await?;
        info!(application_id = %id, actor = %ctx.user_id, "Application deleted");
        Ok(())
    }

    async fn load(&self, id: ApplicationId) -> AppResult<(Application, Participants)> {
        let application = self
            .applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Application {id} not found")))?;
        let participants = Participants::resolve(
            self.companies.as_ref(),
            application.company_id,
            application.expert_id,
        )
        .await?;
        Ok((application, participants))
    }
}

#[cfg(test)]
mod tests {
    use certmatch_core::error::ErrorKind;

    use super::*;
    use crate::testing::Fixture;

    async fn submitted(fx: &Fixture) -> (Application, RequestContext, RequestContext) {
        let (company, owner) = fx.company("owner@example.com", "Acme").await;
        let (expert, expert_ctx) = fx.user("expert@example.com", UserRole::Expert).await;
        let application = fx
            .applications
            .create(
                &owner,
                CreateApplication {
                    company_id: company.id,
                    expert_id: expert.id,
                    certification: "ISO 27001".to_string(),
                    message: Some("Audit in Q3".to_string()),
                },
            )
            .await
            .unwrap();
        (application, owner, expert_ctx)
    }

    #[tokio::test]
    async fn test_create_is_pending() {
        let fx = Fixture::new();
        let (application, _, _) = submitted(&fx).await;
        assert_eq!(application.status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_requires_company_owner() {
        let fx = Fixture::new();
        let (company, _) = fx.company("owner@example.com", "Acme").await;
        let (expert, expert_ctx) = fx.user("expert@example.com", UserRole::Expert).await;
        let err = fx
            .applications
            .create(
                &expert_ctx,
                CreateApplication {
                    company_id: company.id,
                    expert_id: expert.id,
                    certification: "ISO 9001".to_string(),
                    message: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Authorization));
    }

    #[tokio::test]
    async fn test_create_requires_expert_role() {
        let fx = Fixture::new();
        let (company, owner) = fx.company("owner@example.com", "Acme").await;
        let (plain, _) = fx.user("plain@example.com", UserRole::User).await;
        let err = fx
            .applications
            .create(
                &owner,
                CreateApplication {
                    company_id: company.id,
                    expert_id: plain.id,
                    certification: "ISO 9001".to_string(),
                    message: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_expert_accepts_and_terminal_state_sticks() {
        let fx = Fixture::new();
        let (application, owner, expert) = submitted(&fx).await;

        let err = fx
            .applications
            .change_status(&owner, application.id, ApplicationStatus::Accepted)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Authorization));

        let accepted = fx
            .applications
            .change_status(&expert, application.id, ApplicationStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(accepted.status, ApplicationStatus::Accepted);

        let err = fx
            .applications
            .change_status(&owner, application.id, ApplicationStatus::Withdrawn)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_company_withdraws() {
        let fx = Fixture::new();
        let (application, owner, expert) = submitted(&fx).await;

        assert!(fx
            .applications
            .change_status(&expert, application.id, ApplicationStatus::Withdrawn)
            .await
            .unwrap_err()
            .is(ErrorKind::Authorization));

        let withdrawn = fx
            .applications
            .change_status(&owner, application.id, ApplicationStatus::Withdrawn)
            .await
            .unwrap();
        assert_eq!(withdrawn.status, ApplicationStatus::Withdrawn);
    }

    #[tokio::test]
    async fn test_get_hidden_from_strangers() {
        let fx = Fixture::new();
        let (application, _, _) = submitted(&fx).await;
        let (_, stranger) = fx.user("stranger@example.com", UserRole::Expert).await;
        assert!(fx
            .applications
            .get(&stranger, application.id)
            .await
            .unwrap_err()
            .is(ErrorKind::Authorization));
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_actor() {
        let fx = Fixture::new();
        let (application, owner, expert) = submitted(&fx).await;
        let (_, other_expert) = fx.user("other@example.com", UserRole::Expert).await;

        let mine = fx
            .applications
            .list(&expert, ApplicationQuery::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(mine.items.len(), 1);
        assert_eq!(mine.items[0].id, application.id);

        let theirs = fx
            .applications
            .list(&other_expert, ApplicationQuery::default(), PageRequest::default())
            .await
            .unwrap();
        assert!(theirs.items.is_empty());

        let by_owner = fx
            .applications
            .list(
                &owner,
                ApplicationQuery {
                    status: Some(ApplicationStatus::Pending),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(by_owner.total_items, 1);
    }

    #[tokio::test]
    async fn test_delete_only_while_pending() {
        let fx = Fixture::new();
        let (application, owner, expert) = submitted(&fx).await;
        fx.applications
            .change_status(&expert, application.id, ApplicationStatus::Rejected)
            .await
            .unwrap();

        assert!(fx
            .applications
            .delete(&owner, application.id)
            .await
            .unwrap_err()
            .is(ErrorKind::Conflict));
        fx.applications
            .delete(&Fixture::admin(), application.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_decisions_settle_once() {
        let fx = Fixture::new();
        let (application, _, expert) = submitted(&fx).await;

        let (accept, reject) = tokio::join!(
            fx.applications
                .change_status(&expert, application.id, ApplicationStatus::Accepted),
            fx.applications
                .change_status(&expert, application.id, ApplicationStatus::Rejected),
        );
        let winner = match (accept, reject) {
            (Ok(updated), Err(err)) | (Err(err), Ok(updated)) => {
                assert!(err.is(ErrorKind::Conflict));
                updated.status
            }
            (a, b) => panic!("exactly one decision must win: {a:?} / {b:?}"),
        };

        let stored = fx.applications.get(&expert, application.id).await.unwrap();
        assert_eq!(stored.status, winner);
    }
}

