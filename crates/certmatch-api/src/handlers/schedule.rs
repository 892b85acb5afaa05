//! Schedule handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use certmatch_core::types::ScheduleId;
use certmatch_entity::schedule::Schedule;

use crate::dto::request::{CreateScheduleRequest, UpdateScheduleRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{Actor, ValidJson, parse_id};
use crate::state::AppState;

/// POST /api/schedules
pub async fn create_schedule(
    State(state): State<AppState>,
    actor: Actor,
    ValidJson(req): ValidJson<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Schedule>>), ApiError> {
    let schedule = state.schedule_service.create(&actor, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(schedule))))
}

/// GET /api/schedules/{id}
pub async fn get_schedule(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Schedule>>, ApiError> {
    let id: ScheduleId = parse_id(&id, "schedule")?;
    let schedule = state.schedule_service.get(&actor, id).await?;
    Ok(Json(ApiResponse::ok(schedule)))
}

/// PUT /api/schedules/{id}
pub async fn update_schedule(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateScheduleRequest>,
) -> Result<Json<ApiResponse<Schedule>>, ApiError> {
    let id: ScheduleId = parse_id(&id, "schedule")?;
    let schedule = state
        .schedule_service
        .update(&actor, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(schedule)))
}

/// DELETE /api/schedules/{id}
pub async fn delete_schedule(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id: ScheduleId = parse_id(&id, "schedule")?;
    state.schedule_service.delete(&actor, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Schedule deleted"))))
}
