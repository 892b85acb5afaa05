//! Application repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use certmatch_core::error::{AppError, ErrorKind};
use certmatch_core::result::AppResult;
use certmatch_core::types::{ApplicationId, PageRequest, PageResponse};
use certmatch_entity::application::{
    Application, ApplicationFilter, ApplicationStatus, CreateApplication,
};

use super::violated_constraint;
use crate::store::ApplicationStore;

/// Repository for certification applications.
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    /// Create a new application repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ApplicationFilter) {
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
impl ApplicationStore for ApplicationRepository {
    async fn create(&self, data: &CreateApplication) -> AppResult<Application> {
        sqlx::query_as::<_, Application>(
            "INSERT INTO applications (id, company_id, expert_id, certification, message) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(ApplicationId::new())
        .bind(data.company_id)
        .bind(data.expert_id)
        .bind(&data.certification)
        .bind(&data.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("applications_company_id_fkey") => {
                AppError::not_found(format!("Company {} not found", data.company_id))
            }
            Some("applications_expert_id_fkey") => {
                AppError::not_found(format!("Expert {} not found", data.expert_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create application", e),
        })
    }

    async fn find_by_id(&self, id: ApplicationId) -> AppResult<Option<Application>> {
        sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find application", e)
            })
    }

    async fn find_all(
        &self,
        filter: &ApplicationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Application>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM applications");
        push_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count applications", e)
            })?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM applications");
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let items = query
            .build_query_as::<Application>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list applications", e)
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
        id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> AppResult<Application> {
        let updated = sqlx::query_as::<_, Application>(
            "UPDATE applications SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = $3 RETURNING *",
        )
        .bind(id)
        .bind(to)
        .bind(from)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update application status", e)
        })?;

        match updated {
            Some(application) => Ok(application),
            None => match self.find_by_id(id).await? {
                Some(current) => Err(AppError::conflict(format!(
                    "Application {id} is '{}', expected '{from}'",
                    current.status
                ))),
                None => Err(AppError::not_found(format!("Application {id} not found"))),
            },
        }
    }

    async fn delete(&self, id: ApplicationId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete application", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
