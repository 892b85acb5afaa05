//! Company profile lifecycle and the company search.

use std::sync::Arc;

use tracing::info;

use certmatch_core::error::AppError;
use certmatch_core::result::AppResult;
use certmatch_core::types::{CompanyId, UserId};
use certmatch_database::store::CompanyStore;
use certmatch_entity::company::{
    Company, CompanyWithOwner, CreateCompany, SearchCriteria, UpdateCompany,
};
use certmatch_entity::user::UserRole;

use crate::context::RequestContext;

/// Data for registering the actor's company profile.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewCompany {
    /// Display name.
    pub name: String,
    /// Industry label.
    pub industry: String,
    /// Size category, stored verbatim.
    pub size: String,
    /// Address.
    pub address: String,
}

/// Handles company profiles.
#[derive(Debug, Clone)]
pub struct CompanyService {
    companies: Arc<dyn CompanyStore>,
}

impl CompanyService {
    /// Creates a new company service.
    pub fn new(companies: Arc<dyn CompanyStore>) -> Self {
        Self { companies }
    }

    /// Register the actor's company. Requires the `company` role and at
    /// most one company per user.
    pub async fn create(&self, ctx: &RequestContext, req: NewCompany) -> AppResult<Company> {
        if ctx.role != UserRole::Company {
            return Err(AppError::authorization(
                "Only users with the 'company' role may register a company",
            ));
        }
        if self.companies.find_by_user(ctx.user_id).await?.is_some() {
            return Err(AppError::conflict(format!(
                "User {} already has a company profile",
                ctx.user_id
            )));
        }

        let company = self
            .companies
            .create(&CreateCompany {
                user_id: ctx.user_id,
                name: required(&req.name, "name")?,
                industry: required(&req.industry, "industry")?,
                size: required(&req.size, "size")?,
                address: required(&req.address, "address")?,
            })
            .await?;

        info!(company_id = %company.id, user_id = %ctx.user_id, "Company registered");
        Ok(company)
    }

    /// Fetch a company with its owner.
    pub async fn get(&self, id: CompanyId) -> AppResult<CompanyWithOwner> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Company {id} not found")))
    }

    /// Fetch the company owned by a user.
    pub async fn get_by_owner(&self, user_id: UserId) -> AppResult<Company> {
        self.companies
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} has no company")))
    }

    /// Partially update a company. Owner or admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: CompanyId,
        req: UpdateCompany,
    ) -> AppResult<Company> {
        let existing = self.get(id).await?;
        ctx.require_self_or_admin(existing.company.user_id, "company")?;

        if req.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        let data = UpdateCompany {
            name: optional(req.name.as_deref(), "name")?,
            industry: optional(req.industry.as_deref(), "industry")?,
            size: optional(req.size.as_deref(), "size")?,
            address: optional(req.address.as_deref(), "address")?,
        };

        let company = self.companies.update(id, &data).await?;
        info!(company_id = %id, actor = %ctx.user_id, "Company updated");
        Ok(company)
    }

    /// Delete a company. Owner or admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: CompanyId) -> AppResult<()> {
        let existing = self.get(id).await?;
        ctx.require_self_or_admin(existing.company.user_id, "company")?;

        self.companies.delete(id).await?;
        info!(company_id = %id, actor = %ctx.user_id, "Company deleted");
        Ok(())
    }

    /// Companies matching the criteria, ordered by name, each joined with
    /// its owner. Absent criteria impose no constraint; no match is an
    /// empty list.
    pub async fn search(&self, criteria: &SearchCriteria) -> AppResult<Vec<CompanyWithOwner>> {
        self.companies.find_many(&criteria.to_predicate()).await
    }
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("Company {field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>, field: &str) -> AppResult<Option<String>> {
    value.map(|v| required(v, field)).transpose()
}

#[cfg(test)]
mod tests {
    use certmatch_core::error::ErrorKind;

    use super::*;
    use crate::testing::Fixture;

    fn new_company(name: &str, industry: &str, size: &str) -> NewCompany {
        NewCompany {
            name: name.to_string(),
            industry: industry.to_string(),
            size: size.to_string(),
            address: "Seoul Gangnam-gu".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_requires_company_role() {
        let fx = Fixture::new();
        let (_, expert) = fx.user("expert@example.com", UserRole::Expert).await;
        let err = fx
            .companies
            .create(&expert, new_company("Acme", "IT", "SMALL"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Authorization));
    }

    #[tokio::test]
    async fn test_second_company_conflicts() {
        let fx = Fixture::new();
        let (_, ctx) = fx.user("owner@example.com", UserRole::Company).await;
        fx.companies
            .create(&ctx, new_company("Acme", "IT", "SMALL"))
            .await
            .unwrap();
        let err = fx
            .companies
            .create(&ctx, new_company("Acme 2", "IT", "SMALL"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_update_owner_or_admin_only() {
        let fx = Fixture::new();
        let (company, owner) = fx.company("owner@example.com", "Acme").await;
        let (_, stranger) = fx.user("stranger@example.com", UserRole::Company).await;

        let change = UpdateCompany {
            industry: Some("Finance".to_string()),
            ..Default::default()
        };
        let err = fx
            .companies
            .update(&stranger, company.id, change.clone())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Authorization));

        let updated = fx.companies.update(&owner, company.id, change).await.unwrap();
        assert_eq!(updated.industry, "Finance");
        assert_eq!(updated.name, "Acme");

        let renamed = fx
            .companies
            .update(
                &Fixture::admin(),
                company.id,
                UpdateCompany {
                    name: Some("Acme Holdings".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Acme Holdings");
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let fx = Fixture::new();
        let (company, owner) = fx.company("owner@example.com", "Acme").await;
        let err = fx
            .companies
            .update(&owner, company.id, UpdateCompany::default())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_search_through_service() {
        let fx = Fixture::new();
        for (email, name, industry, size) in [
            ("b@example.com", "B", "IT", "SMALL"),
            ("a@example.com", "A", "it services", "SMALL_BUSINESS"),
            ("c@example.com", "C", "금융업", "LARGE"),
        ] {
            let (_, ctx) = fx.user(email, UserRole::Company).await;
            fx.companies
                .create(&ctx, new_company(name, industry, size))
                .await
                .unwrap();
        }

        let all = fx.companies.search(&SearchCriteria::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|c| c.company.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let it_small = fx
            .companies
            .search(&SearchCriteria {
                industry: Some("it".to_string()),
                size: Some("SMALL".to_string()),
                location: None,
            })
            .await
            .unwrap();
        assert_eq!(it_small.len(), 1);
        assert_eq!(it_small[0].company.name, "B");
        assert_eq!(it_small[0].user.email, "b@example.com");
    }

    #[tokio::test]
    async fn test_get_by_owner() {
        let fx = Fixture::new();
        let (company, owner) = fx.company("owner@example.com", "Acme").await;
        assert_eq!(
            fx.companies.get_by_owner(owner.user_id).await.unwrap().id,
            company.id
        );
        assert!(fx
            .companies
            .get_by_owner(UserId::new())
            .await
            .unwrap_err()
            .is(ErrorKind::NotFound));
    }

    /// A company store whose backend is gone.
    #[derive(Debug)]
    struct UnreachableCompanies;

    fn backend_down() -> AppError {
        AppError::with_source(
            ErrorKind::Database,
            "Failed to search companies",
            std::io::Error::other("connection reset"),
        )
    }

    #[async_trait::async_trait]
    impl CompanyStore for UnreachableCompanies {
        async fn create(&self, _: &CreateCompany) -> AppResult<Company> {
            Err(backend_down())
        }
        async fn find_by_id(&self, _: CompanyId) -> AppResult<Option<CompanyWithOwner>> {
            Err(backend_down())
        }
        async fn find_by_user(&self, _: UserId) -> AppResult<Option<Company>> {
            Err(backend_down())
        }
        async fn update(&self, _: CompanyId, _: &UpdateCompany) -> AppResult<Company> {
            Err(backend_down())
        }
        async fn delete(&self, _: CompanyId) -> AppResult<bool> {
            Err(backend_down())
        }
        async fn find_many(
            &self,
            _: &certmatch_entity::company::CompanyPredicate,
        ) -> AppResult<Vec<CompanyWithOwner>> {
            Err(backend_down())
        }
    }

    #[tokio::test]
    async fn test_search_propagates_store_failure() {
        let service = CompanyService::new(Arc::new(UnreachableCompanies));
        let err = service
            .search(&SearchCriteria::default())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Database));
        assert_eq!(err.message, "Failed to search companies");
        assert!(std::error::Error::source(&err).is_some());
    }
}

