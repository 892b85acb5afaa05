//! Meeting and audit slots attached to applications.

use std::sync::Arc;

use tracing::info;

use certmatch_core::error::AppError;
use certmatch_core::result::AppResult;
use certmatch_core::types::{ApplicationId, ScheduleId};
use certmatch_database::store::{ApplicationStore, CompanyStore, ScheduleStore};
use certmatch_entity::schedule::model::is_valid_window;
use certmatch_entity::schedule::{CreateSchedule, Schedule, UpdateSchedule};

use crate::access::Participants;
use crate::context::RequestContext;

/// Handles schedule entries. Every operation is limited to the
/// participants of the owning application and admins.
#[derive(Debug, Clone)]
pub struct ScheduleService {
    schedules: Arc<dyn ScheduleStore>,
    applications: Arc<dyn ApplicationStore>,
    companies: Arc<dyn CompanyStore>,
}

impl ScheduleService {
    /// Creates a new schedule service.
    pub fn new(
        schedules: Arc<dyn ScheduleStore>,
        applications: Arc<dyn ApplicationStore>,
        companies: Arc<dyn CompanyStore>,
    ) -> Self {
        Self {
            schedules,
            applications,
            companies,
        }
    }

    /// Add an entry to an application.
    pub async fn create(&self, ctx: &RequestContext, req: CreateSchedule) -> AppResult<Schedule> {
        self.authorize(ctx, req.application_id).await?;

        let title = req.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title must not be blank"));
        }
        if !is_valid_window(req.starts_at, req.ends_at) {
            return Err(AppError::validation("ends_at must be after starts_at"));
        }

        let schedule = self
            .schedules
            .create(&CreateSchedule {
                title: title.to_string(),
                ..req
            })
            .await?;

        info!(
            schedule_id = %schedule.id,
            application_id = %schedule.application_id,
            starts_at = %schedule.starts_at,
            "Schedule created"
        );
        Ok(schedule)
    }

    /// Fetch one entry.
    pub async fn get(&self, ctx: &RequestContext, id: ScheduleId) -> AppResult<Schedule> {
        let schedule = self.find(id).await?;
        self.authorize(ctx, schedule.application_id).await?;
        Ok(schedule)
    }

    /// Entries of an application ordered by start time.
    pub async fn list_by_application(
        &self,
        ctx: &RequestContext,
        application_id: ApplicationId,
    ) -> AppResult<Vec<Schedule>> {
        self.authorize(ctx, application_id).await?;
        self.schedules.find_by_application(application_id).await
    }

    /// Partially update an entry. The resulting window must stay valid.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ScheduleId,
        req: UpdateSchedule,
    ) -> AppResult<Schedule> {
        let existing = self.find(id).await?;
        self.authorize(ctx, existing.application_id).await?;

        if req.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("Title must not be blank"));
        }
        let mut merged = existing.clone();
        req.apply_to(&mut merged);
        if !is_valid_window(merged.starts_at, merged.ends_at) {
            return Err(AppError::validation("ends_at must be after starts_at"));
        }

        let schedule = self.schedules.update(id, &req).await?;
        info!(schedule_id = %id, actor = %ctx.user_id, "Schedule updated");
        Ok(schedule)
    }

    /// Delete an entry.
    pub async fn delete(&self, ctx: &RequestContext, id: ScheduleId) -> AppResult<()> {
        let existing = self.find(id).await?;
        self.authorize(ctx, existing.application_id).await?;

        self.schedules.delete(id).await?;
        info!(schedule_id = %id, actor = %ctx.user_id, "Schedule deleted");
        Ok(())
    }

    async fn find(&self, id: ScheduleId) -> AppResult<Schedule> {
        self.schedules
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Schedule {id} not found")))
    }

    async fn authorize(&self, ctx: &RequestContext, application_id: ApplicationId) -> AppResult<()> {
        let application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Application {application_id} not found")))?;
        Participants::resolve(
            self.companies.as_ref(),
            application.company_id,
            application.expert_id,
        )
        .await?
        .require_participant(ctx, "schedule")
    }
}
