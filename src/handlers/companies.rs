use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::services::companies::{CompanyListResponse, CompanySuggestion};
use crate::{errors::ServiceError, ApiResponse, AppState, ListQuery};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub term: String,
}

/// List companies
#[utoipa::path(
    get,
    path = "/api/v1/companies",
    summary = "List companies",
    description = "Get a paginated list of companies, alphabetical by name",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 20)"),
        ("search" = Option<String>, Query, description = "Filter by company name"),
    ),
    responses(
        (status = 200, description = "Companies retrieved successfully", body = ApiResponse<CompanyListResponse>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<CompanyListResponse>>, ServiceError> {
    let limit = query.clamped_limit(&state.config);
    let result = state
        .services
        .companies
        .list_companies(query.page, limit, query.search)
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

/// Company name autocomplete
#[utoipa::path(
    get,
    path = "/api/v1/companies/autocomplete",
    summary = "Autocomplete company names",
    description = "Name suggestions for the quotation form's customer picker",
    params(("term" = String, Query, description = "Partial company name")),
    responses(
        (status = 200, description = "Suggestions retrieved successfully", body = ApiResponse<Vec<CompanySuggestion>>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn autocomplete_companies(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<ApiResponse<Vec<CompanySuggestion>>>, ServiceError> {
    let suggestions = state.services.companies.autocomplete(&query.term).await?;
    Ok(Json(ApiResponse::success(suggestions)))
}

/// Delete a company
#[utoipa::path(
    delete,
    path = "/api/v1/companies/{id}",
    summary = "Delete company",
    description = "Delete a company that no quotation references",
    params(("id" = i64, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company deleted successfully", body = ApiResponse<Value>),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Company is referenced by quotations", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Value>>, ServiceError> {
    state.services.companies.delete_company(id).await?;
    Ok(Json(ApiResponse::success(json!({ "deleted": id }))))
}
