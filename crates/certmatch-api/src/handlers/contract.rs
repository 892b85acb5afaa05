//! Contract handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use certmatch_core::types::ContractId;
use certmatch_entity::contract::Contract;
use certmatch_service::contract::ContractQuery;

use crate::dto::request::{ContractStatusRequest, CreateContractRequest};
use crate::dto::response::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::{Actor, PaginationParams, ValidJson, ValidQuery, parse_id};
use crate::state::AppState;

/// POST /api/contracts
pub async fn create_contract(
    State(state): State<AppState>,
    actor: Actor,
    ValidJson(req): ValidJson<CreateContractRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Contract>>), ApiError> {
    let contract = state.contract_service.create(&actor, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(contract))))
}

/// GET /api/contracts
pub async fn list_contracts(
    State(state): State<AppState>,
    actor: Actor,
    ValidQuery(query): ValidQuery<ContractQuery>,
    ValidQuery(pagination): ValidQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Contract>>>, ApiError> {
    let page = state
        .contract_service
        .list(&actor, query, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}

/// GET /api/contracts/{id}
pub async fn get_contract(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Contract>>, ApiError> {
    let id: ContractId = parse_id(&id, "contract")?;
    let contract = state.contract_service.get(&actor, id).await?;
    Ok(Json(ApiResponse::ok(contract)))
}

/// PUT /api/contracts/{id}/status
pub async fn change_contract_status(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<ContractStatusRequest>,
) -> Result<Json<ApiResponse<Contract>>, ApiError> {
    let id: ContractId = parse_id(&id, "contract")?;
    let contract = state
        .contract_service
        .change_status(&actor, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(contract)))
}

/// DELETE /api/contracts/{id}
pub async fn delete_contract(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id: ContractId = parse_id(&id, "contract")?;
    state.contract_service.delete(&actor, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Contract deleted"))))
}
