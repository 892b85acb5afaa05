//! User account handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use certmatch_core::types::UserId;

use crate::dto::request::{RegisterUserRequest, UpdateUserRequest, UserListQuery};
use crate::dto::response::{ApiResponse, MessageResponse, PaginatedResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{Actor, PaginationParams, ValidJson, ValidQuery, parse_id};
use crate::state::AppState;

/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state.user_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<UserListQuery>,
    ValidQuery(pagination): ValidQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<UserResponse>>>, ApiError> {
    let page = state
        .user_service
        .list(filter.role, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.map(UserResponse::from).into())))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let id: UserId = parse_id(&id, "user")?;
    let user = state.user_service.get(id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let id: UserId = parse_id(&id, "user")?;
    let user = state.user_service.update(&actor, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id: UserId = parse_id(&id, "user")?;
    state.user_service.delete(&actor, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("User deleted"))))
}
