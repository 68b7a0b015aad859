use utoipa::OpenApi;

use crate::errors::ErrorResponse;
use crate::models::{
    AddressBlock, LineItem, QuotationHeader, QuotationStatus, QuotationTotals, Surcharges,
    TaxPercents,
};
use crate::services::companies::{CompanyListResponse, CompanyResponse, CompanySuggestion};
use crate::services::quotations::{
    LeadQuotationsResponse, QuotationDraft, QuotationListResponse, QuotationResponse,
};

/// OpenAPI document for the quotation API, served at `/api/v1/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quotation API",
        description = "Sales quotation management: per-line pricing, GST aggregation and revision history per lead"
    ),
    paths(
        crate::handlers::quotations::list_quotations,
        crate::handlers::quotations::create_quotation,
        crate::handlers::quotations::get_quotation,
        crate::handlers::quotations::replace_quotation,
        crate::handlers::quotations::delete_quotation,
        crate::handlers::companies::list_companies,
        crate::handlers::companies::autocomplete_companies,
        crate::handlers::companies::delete_company,
    ),
    components(schemas(
        QuotationDraft,
        QuotationResponse,
        QuotationListResponse,
        LeadQuotationsResponse,
        QuotationHeader,
        QuotationStatus,
        AddressBlock,
        Surcharges,
        TaxPercents,
        LineItem,
        QuotationTotals,
        CompanyResponse,
        CompanyListResponse,
        CompanySuggestion,
        ErrorResponse,
    )),
    tags(
        (name = "quotations", description = "Quotation document management"),
        (name = "companies", description = "Customer companies"),
    )
)]
pub struct ApiDoc;
