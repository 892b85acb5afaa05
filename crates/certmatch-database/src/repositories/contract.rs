//! Contract repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use certmatch_core::error::{AppError, ErrorKind};
use certmatch_core::result::AppResult;
use certmatch_core::types::{ApplicationId, ContractId, PageRequest, PageResponse};
use certmatch_entity::contract::{Contract, ContractFilter, ContractStatus, CreateContract};

use super::violated_constraint;
use crate::store::ContractStore;

/// Repository for contracts.
#[derive(Debug, Clone)]
pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    /// Create a new contract repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ContractFilter) {
    qb.push(" WHERE TRUE");
    if let Some(company_id) = filter.company_id {
        qb.push(" AND company_id = ").push_bind(company_id);
    }
    if let Some(expert_id) = filter.expert_id {
        qb.push(" AND expert_id = ").push_bind(expert_id);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
}

#[async_trait]
impl ContractStore for ContractRepository {
    async fn create(&self, data: &CreateContract) -> AppResult<Contract> {
        sqlx::query_as::<_, Contract>(
            "INSERT INTO contracts \
                 (id, application_id, company_id, expert_id, amount, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(ContractId::new())
        .bind(data.application_id)
        .bind(data.company_id)
        .bind(data.expert_id)
        .bind(data.amount)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("contracts_application_id_key") => AppError::conflict(format!(
                "Application {} already has a contract",
                data.application_id
            )),
            Some("contracts_dates_check") => {
                AppError::validation("end_date must not be before start_date")
            }
            Some("contracts_amount_check") => AppError::validation("amount must not be negative"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create contract", e),
        })
    }

    async fn find_by_id(&self, id: ContractId) -> AppResult<Option<Contract>> {
        sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find contract", e))
    }

    async fn find_by_application(
        &self,
        application_id: ApplicationId,
    ) -> AppResult<Option<Contract>> {
        sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE application_id = $1")
            .bind(application_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to find contract by application",
                    e,
                )
            })
    }

    async fn find_all(
        &self,
        filter: &ContractFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Contract>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contracts");
        push_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count contracts", e)
            })?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM contracts");
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let items = query
            .build_query_as::<Contract>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list contracts", e)
            })?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn update_status(
        &self,
        id: ContractId,
        from: ContractStatus,
        to: ContractStatus,
    ) -> AppResult<Contract> {
        let updated = sqlx::query_as::<_, Contract>(
            "UPDATE contracts SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = $3 RETURNING *",
        )
        .bind(id)
        .bind(to)
        .bind(from)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update contract status", e)
        })?;

        match updated {
            Some(contract) => Ok(contract),
            None => match self.find_by_id(id).await? {
                Some(current) => Err(AppError::conflict(format!(
                    "Contract {id} is '{}', expected '{from}'",
                    current.status
                ))),
                None => Err(AppError::not_found(format!("Contract {id} not found"))),
            },
        }
    }

    async fn delete(&self, id: ContractId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete contract", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
