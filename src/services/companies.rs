use crate::{
    db::DbPool,
    entities::company::{self, Entity as CompanyEntity, Model as CompanyModel},
    entities::quotation_row::{self, Entity as QuotationRowEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};
use metrics::counter;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

/// Maximum suggestions returned by autocomplete regardless of match count.
const AUTOCOMPLETE_LIMIT: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub id: i64,
    pub company_name: String,
    pub contact_person: String,
    pub contact_no: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub created_date: chrono::DateTime<chrono::Utc>,
}

impl From<CompanyModel> for CompanyResponse {
    fn from(model: CompanyModel) -> Self {
        Self {
            id: model.id,
            company_name: model.company_name,
            contact_person: model.contact_person,
            contact_no: model.contact_no,
            email: model.email,
            address: model.address,
            city: model.city,
            state: model.state,
            created_date: model.created_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanyResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Minimal id/name pair for typeahead pickers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanySuggestion {
    pub id: i64,
    pub company_name: String,
}

#[derive(Clone)]
pub struct CompanyService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl CompanyService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Lists companies alphabetically, optionally filtered by a name search.
    #[instrument(skip(self))]
    pub async fn list_companies(
        &self,
        page: u64,
        per_page: u64,
        search: Option<String>,
    ) -> Result<CompanyListResponse, ServiceError> {
        let db = &*self.db_pool;
        let page = page.max(1);

        let mut query = CompanyEntity::find();
        if let Some(term) = search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(company::Column::CompanyName.contains(term));
        }
        let paginator = query
            .order_by_asc(company::Column::CompanyName)
            .paginate(db, per_page);

        let total = paginator.num_items().await.map_err(|e| {
            error!(error = %e, "Failed to count companies");
            ServiceError::DatabaseError(e)
        })?;
        let companies = paginator.fetch_page(page - 1).await.map_err(|e| {
            error!(error = %e, page = page, "Failed to fetch companies page");
            ServiceError::DatabaseError(e)
        })?;

        Ok(CompanyListResponse {
            companies: companies.into_iter().map(CompanyResponse::from).collect(),
            total,
            page,
            per_page,
        })
    }

    /// Name suggestions for the quotation form's customer picker. An empty
    /// term returns no suggestions rather than the whole table.
    #[instrument(skip(self))]
    pub async fn autocomplete(&self, term: &str) -> Result<Vec<CompanySuggestion>, ServiceError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let db = &*self.db_pool;
        let companies = CompanyEntity::find()
            .filter(company::Column::CompanyName.contains(term))
            .order_by_asc(company::Column::CompanyName)
            .limit(AUTOCOMPLETE_LIMIT)
            .all(db)
            .await?;
        Ok(companies
            .into_iter()
            .map(|c| CompanySuggestion {
                id: c.id,
                company_name: c.company_name,
            })
            .collect())
    }

    /// Deletes a company. Companies still referenced by quotation rows are
    /// protected; the caller must delete the quotations first.
    #[instrument(skip(self), fields(company_id = %company_id))]
    pub async fn delete_company(&self, company_id: i64) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let references = QuotationRowEntity::find()
            .filter(quotation_row::Column::CustomerId.eq(company_id))
            .count(db)
            .await?;
        if references > 0 {
            return Err(ServiceError::Conflict(format!(
                "Company {company_id} is referenced by {references} quotation row(s)"
            )));
        }

        let result = CompanyEntity::delete_by_id(company_id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Company {company_id} not found"
            )));
        }

        counter!("quotation_api_companies_deleted_total", 1);
        info!(company_id = company_id, "Company deleted");
        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::CompanyDeleted { company_id }).await {
                warn!(error = %e, company_id = company_id, "Failed to send company deleted event");
            }
        }
        Ok(())
    }
}
