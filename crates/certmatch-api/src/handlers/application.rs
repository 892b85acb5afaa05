//! Certification application handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use certmatch_core::types::ApplicationId;
use certmatch_entity::application::Application;
use certmatch_entity::schedule::Schedule;
use certmatch_service::application::ApplicationQuery;

use crate::dto::request::{ApplicationStatusRequest, CreateApplicationRequest};
use crate::dto::response::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::{Actor, PaginationParams, ValidJson, ValidQuery, parse_id};
use crate::state::AppState;

/// POST /api/applications
pub async fn create_application(
    State(state): State<AppState>,
    actor: Actor,
    ValidJson(req): ValidJson<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Application>>), ApiError> {
    let application = state
        .application_service
        .create(&actor, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(application))))
}

/// GET /api/applications
pub async fn list_applications(
    State(state): State<AppState>,
    actor: Actor,
    ValidQuery(query): ValidQuery<ApplicationQuery>,
    ValidQuery(pagination): ValidQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Application>>>, ApiError> {
    let page = state
        .application_service
        .list(&actor, query, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}

/// GET /api/applications/{id}
pub async fn get_application(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Application>>, ApiError> {
    let id: ApplicationId = parse_id(&id, "application")?;
    let application = state.application_service.get(&actor, id).await?;
    Ok(Json(ApiResponse::ok(application)))
}

/// PUT /api/applications/{id}/status
pub async fn change_application_status(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<ApplicationStatusRequest>,
) -> Result<Json<ApiResponse<Application>>, ApiError> {
    let id: ApplicationId = parse_id(&id, "application")?;
    let application = state
        .application_service
        .change_status(&actor, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(application)))
}

/// DELETE /api/applications/{id}
pub async fn delete_application(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id: ApplicationId = parse_id(&id, "application")?;
    state.application_service.delete(&actor, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Application deleted",
    ))))
}

/// GET /api/applications/{id}/schedules
pub async fn list_application_schedules(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Schedule>>>, ApiError> {
    let id: ApplicationId = parse_id(&id, "application")?;
    let schedules = state
        .schedule_service
        .list_by_application(&actor, id)
        .await?;
    Ok(Json(ApiResponse::ok(schedules)))
}
