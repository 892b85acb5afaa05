//! Schedule repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use certmatch_core::error::{AppError, ErrorKind};
use certmatch_core::result::AppResult;
use certmatch_core::types::{ApplicationId, ScheduleId};
use certmatch_entity::schedule::{CreateSchedule, Schedule, UpdateSchedule};

use super::violated_constraint;
use crate::store::ScheduleStore;

const WINDOW_CHECK: &str = "schedules_window_check";

/// Repository for schedule entries.
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Create a new schedule repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleStore for ScheduleRepository {
    async fn create(&self, data: &CreateSchedule) -> AppResult<Schedule> {
        sqlx::query_as::<_, Schedule>(
            "INSERT INTO schedules (id, application_id, title, starts_at, ends_at, location, note) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(ScheduleId::new())
        .bind(data.application_id)
        .bind(&data.title)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(&data.location)
        .bind(&data.note)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some(WINDOW_CHECK) => AppError::validation("ends_at must be after starts_at"),
            Some("schedules_application_id_fkey") => {
                AppError::not_found(format!("Application {} not found", data.application_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create schedule", e),
        })
    }

    async fn find_by_id(&self, id: ScheduleId) -> AppResult<Option<Schedule>> {
        sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find schedule", e))
    }

    async fn find_by_application(&self, application_id: ApplicationId) -> AppResult<Vec<Schedule>> {
        sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedules WHERE application_id = $1 ORDER BY starts_at ASC, id ASC",
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list schedules", e))
    }

    async fn update(&self, id: ScheduleId, data: &UpdateSchedule) -> AppResult<Schedule> {
        sqlx::query_as::<_, Schedule>(
            "UPDATE schedules SET title = COALESCE($2, title), \
                                  starts_at = COALESCE($3, starts_at), \
                                  ends_at = COALESCE($4, ends_at), \
                                  location = COALESCE($5, location), \
                                  note = COALESCE($6, note), \
                                  updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(&data.location)
        .bind(&data.note)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some(WINDOW_CHECK) => AppError::validation("ends_at must be after starts_at"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to update schedule", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Schedule {id} not found")))
    }

    async fn delete(&self, id: ScheduleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete schedule", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
