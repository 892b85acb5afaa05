//! Contracts drawn up from accepted applications.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use certmatch_core::error::AppError;
use certmatch_core::result::AppResult;
use certmatch_core::types::{
    ApplicationId, CompanyId, ContractId, PageRequest, PageResponse, UserId,
};
use certmatch_database::store::{ApplicationStore, CompanyStore, ContractStore};
use certmatch_entity::application::ApplicationStatus;
use certmatch_entity::contract::{Contract, ContractFilter, ContractStatus, CreateContract};

use crate::access::{ListScope, Participants};
use crate::context::RequestContext;

/// Data for drafting a contract.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewContract {
    /// Accepted application the contract is based on.
    pub application_id: ApplicationId,
    /// Fee in minor currency units.
    pub amount: i64,
    /// First day of the engagement.
    pub start_date: NaiveDate,
    /// Last day of the engagement.
    pub end_date: NaiveDate,
}

/// Requested filters for a contract listing.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ContractQuery {
    /// Only this company's contracts.
    pub company_id: Option<CompanyId>,
    /// Only this expert's contracts.
    pub expert_id: Option<UserId>,
    /// Only contracts in this status.
    pub status: Option<ContractStatus>,
}

/// Handles contracts.
#[derive(Debug, Clone)]
pub struct ContractService {
    contracts: Arc<dyn ContractStore>,
    applications: Arc<dyn ApplicationStore>,
    companies: Arc<dyn CompanyStore>,
}

impl ContractService {
    /// Creates a new contract service.
    pub fn new(
        contracts: Arc<dyn ContractStore>,
        applications: Arc<dyn ApplicationStore>,
        companies: Arc<dyn CompanyStore>,
    ) -> Self {
        Self {
            contracts,
            applications,
            companies,
        }
    }

    /// Draft a contract from an accepted application. Company owner or
    /// admin only; one contract per application.
    pub async fn create(&self, ctx: &RequestContext, req: NewContract) -> AppResult<Contract> {
        let application = self
            .applications
            .find_by_id(req.application_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Application {} not found", req.application_id))
            })?;
        Participants::resolve(
            self.companies.as_ref(),
            application.company_id,
            application.expert_id,
        )
        .await?
        .require_company_side(ctx, "draft a contract")?;

        if application.status != ApplicationStatus::Accepted {
            return Err(AppError::conflict(format!(
                "Application {} is '{}'; contracts require an accepted application",
                application.id, application.status
            )));
        }
        if req.amount < 0 {
            return Err(AppError::validation("amount must not be negative"));
        }
        if req.end_date < req.start_date {
            return Err(AppError::validation("end_date must not be before start_date"));
        }
        if self
            .contracts
            .find_by_application(application.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Application {} already has a contract",
                application.id
            )));
        }

        let contract = self
            .contracts
            .create(&CreateContract {
                application_id: application.id,
                company_id: application.company_id,
                expert_id: application.expert_id,
                amount: req.amount,
                start_date: req.start_date,
                end_date: req.end_date,
            })
            .await?;

        info!(
            contract_id = %contract.id,
            application_id = %contract.application_id,
            amount = contract.amount,
            "Contract drafted"
        );
        Ok(contract)
    }

    /// Fetch a contract. Participants and admins only.
    pub async fn get(&self, ctx: &RequestContext, id: ContractId) -> AppResult<Contract> {
        let (contract, participants) = self.load(id).await?;
        participants.require_participant(ctx, "contract")?;
        Ok(contract)
    }

    /// List the contracts the actor may see, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: ContractQuery,
        page: PageRequest,
    ) -> AppResult<PageResponse<Contract>> {
        let scope = ListScope::for_actor(ctx, self.companies.as_ref()).await?;
        let Some((company_id, expert_id)) = scope.narrow(query.company_id, query.expert_id) else {
            return Ok(PageResponse::new(Vec::new(), page.page, page.page_size, 0));
        };

        let filter = ContractFilter {
            company_id,
            expert_id,
            status: query.status,
        };
        self.contracts.find_all(&filter, &page).await
    }

    /// Move a contract to a new status. Either participant may sign,
    /// complete or cancel.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        id: ContractId,
        next: ContractStatus,
    ) -> AppResult<Contract> {
        let (contract, participants) = self.load(id).await?;
        participants.require_participant(ctx, "contract")?;

        if !contract.status.can_transition_to(next) {
            return Err(AppError::conflict(format!(
                "Contract {id} cannot move from '{}' to '{next}'",
                contract.status
            )));
        }

        let updated = self
            .contracts
            .update_status(id, contract.status, next)
            .await?;
        info!(
            contract_id = %id,
            from = %contract.status,
            to = %next,
            actor = %ctx.user_id,
            "Contract status changed"
        );
        Ok(updated)
    }

    /// Delete a contract. The company owner may delete drafts; admins
    /// may delete any contract.
    pub async fn delete(&self, ctx: &RequestContext, id: ContractId) -> AppResult<()> {
        let (contract, participants) = self.load(id).await?;
        participants.require_company_side(ctx, "delete a contract")?;

        if !ctx.is_admin && contract.status != ContractStatus::Draft {
            return Err(AppError::conflict(format!(
                "Contract {id} is '{}'; only drafts can be deleted",
                contract.status
            )));
        }

        self.contracts.delete(id).await?;
        info!(contract_id = %id, actor = %ctx.user_id, "Contract deleted");
        Ok(())
    }

    async fn load(&self, id: ContractId) -> AppResult<(Contract, Participants)> {
        let contract = self
            .contracts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Contract {id} not found")))?;
        let participants =
            Participants::resolve(self.companies.as_ref(), contract.company_id, contract.expert_id)
                .await?;
        Ok((contract, participants))
    }
}
