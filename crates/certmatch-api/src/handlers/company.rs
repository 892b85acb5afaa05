//! Company profile and search handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use certmatch_core::types::CompanyId;
use certmatch_entity::company::{Company, CompanyWithOwner};

use crate::dto::request::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{Actor, SearchQuery, ValidJson, parse_id};
use crate::state::AppState;

/// GET /api/companies?industry=&size=&location=
///
/// Every parameter is optional; none given lists all companies. Malformed
/// parameters are ignored rather than rejected. The result is ordered by
/// name and is an empty array when nothing matches.
pub async fn search_companies(
    State(state): State<AppState>,
    SearchQuery(criteria): SearchQuery,
) -> Result<Json<ApiResponse<Vec<CompanyWithOwner>>>, ApiError> {
    let companies = state.company_service.search(&criteria).await?;
    Ok(Json(ApiResponse::ok(companies)))
}

/// POST /api/companies
pub async fn create_company(
    State(state): State<AppState>,
    actor: Actor,
    ValidJson(req): ValidJson<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Company>>), ApiError> {
    let company = state.company_service.create(&actor, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(company))))
}

/// GET /api/companies/{id}
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CompanyWithOwner>>, ApiError> {
    let id: CompanyId = parse_id(&id, "company")?;
    let company = state.company_service.get(id).await?;
    Ok(Json(ApiResponse::ok(company)))
}

/// PUT /api/companies/{id}
pub async fn update_company(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    let id: CompanyId = parse_id(&id, "company")?;
    let company = state.company_service.update(&actor, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(company)))
}

/// DELETE /api/companies/{id}
pub async fn delete_company(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id: CompanyId = parse_id(&id, "company")?;
    state.company_service.delete(&actor, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Company deleted"))))
}
