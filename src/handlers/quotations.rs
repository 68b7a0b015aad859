use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::services::quotations::{QuotationDraft, QuotationListResponse, QuotationResponse};
use crate::{errors::ServiceError, ApiResponse, AppState, ListQuery};

/// List quotations grouped by lead
#[utoipa::path(
    get,
    path = "/api/v1/quotations",
    summary = "List quotations",
    description = "Get a paginated list of leads, each with its current quotation revision and history",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Leads per page (default: 20)"),
        ("search" = Option<String>, Query, description = "Match on quotation number or company name"),
    ),
    responses(
        (status = 200, description = "Quotations retrieved successfully", body = ApiResponse<QuotationListResponse>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_quotations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<QuotationListResponse>>, ServiceError> {
    let limit = query.clamped_limit(&state.config);
    let result = state
        .services
        .quotations
        .list_quotations(query.page, limit, query.search)
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

/// Create a new quotation
#[utoipa::path(
    post,
    path = "/api/v1/quotations",
    summary = "Create quotation",
    description = "Create a quotation under a new quotation number. Line and document totals are computed server-side.",
    request_body = QuotationDraft,
    responses(
        (status = 201, description = "Quotation created successfully", body = ApiResponse<QuotationResponse>),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_quotation(
    State(state): State<AppState>,
    Json(draft): Json<QuotationDraft>,
) -> Result<(StatusCode, Json<ApiResponse<QuotationResponse>>), ServiceError> {
    let response = state.services.quotations.create_quotation(draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))))
}

/// Get a quotation by number
#[utoipa::path(
    get,
    path = "/api/v1/quotations/{quot_no}",
    summary = "Get quotation",
    description = "Fetch one quotation document by its business number",
    params(("quot_no" = String, Path, description = "Quotation number")),
    responses(
        (status = 200, description = "Quotation retrieved successfully", body = ApiResponse<QuotationResponse>),
        (status = 404, description = "Quotation not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_quotation(
    State(state): State<AppState>,
    Path(quot_no): Path<String>,
) -> Result<Json<ApiResponse<QuotationResponse>>, ServiceError> {
    let response = state.services.quotations.get_quotation(&quot_no).await?;
    Ok(Json(ApiResponse::success(response)))
}

/// Replace a quotation
#[utoipa::path(
    put,
    path = "/api/v1/quotations/{quot_no}",
    summary = "Replace quotation",
    description = "Replace the document stored under this number. The quotation number in the body is ignored in favor of the path.",
    params(("quot_no" = String, Path, description = "Quotation number")),
    request_body = QuotationDraft,
    responses(
        (status = 200, description = "Quotation replaced successfully", body = ApiResponse<QuotationResponse>),
        (status = 422, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn replace_quotation(
    State(state): State<AppState>,
    Path(quot_no): Path<String>,
    Json(draft): Json<QuotationDraft>,
) -> Result<Json<ApiResponse<QuotationResponse>>, ServiceError> {
    let response = state
        .services
        .quotations
        .replace_quotation(&quot_no, draft)
        .await?;
    Ok(Json(ApiResponse::success(response)))
}

/// Delete a quotation
#[utoipa::path(
    delete,
    path = "/api/v1/quotations/{quot_no}",
    summary = "Delete quotation",
    description = "Delete every stored row of a quotation",
    params(("quot_no" = String, Path, description = "Quotation number")),
    responses(
        (status = 200, description = "Quotation deleted successfully", body = ApiResponse<Value>),
        (status = 404, description = "Quotation not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_quotation(
    State(state): State<AppState>,
    Path(quot_no): Path<String>,
) -> Result<Json<ApiResponse<Value>>, ServiceError> {
    state.services.quotations.delete_quotation(&quot_no).await?;
    Ok(Json(ApiResponse::success(json!({ "deleted": quot_no }))))
}
