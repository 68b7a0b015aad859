use crate::{
    db::DbPool,
    entities::company::{self, Entity as CompanyEntity},
    entities::quotation_row::{self, Entity as QuotationRowEntity},
    errors::ServiceError,
    events::{Event, EventSender},
    models::{LineItem, QuotationHeader, QuotationStatus, QuotationTotals},
    services::{materialize, pricing},
};
use chrono::Utc;
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

/// A quotation as submitted by a client: header plus lines. Line totals and
/// document totals carried on the wire are ignored and recomputed here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuotationDraft {
    #[serde(flatten)]
    pub header: QuotationHeader,
    #[serde(default)]
    pub lines: Vec<LineItem>,
    /// When set and `customer_id` is 0, the company is looked up by name and
    /// created on the fly if missing.
    pub company_name: Option<String>,
}

/// A fully assembled quotation document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuotationResponse {
    pub quot_id: i64,
    #[serde(flatten)]
    pub header: QuotationHeader,
    pub company_name: Option<String>,
    pub lines: Vec<LineItem>,
    pub totals: QuotationTotals,
}

/// One lead with its current quotation revision and the older revisions,
/// newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeadQuotationsResponse {
    pub lead_id: i64,
    pub current: QuotationResponse,
    pub history: Vec<QuotationResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuotationListResponse {
    pub leads: Vec<LeadQuotationsResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Service for managing quotation documents over the denormalized row store.
#[derive(Clone)]
pub struct QuotationService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

fn validate_money(field: &str, value: Decimal) -> Result<(), ServiceError> {
    if value < Decimal::ZERO {
        return Err(ServiceError::InvalidInput(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

/// Field checks the derive-based validator cannot express for `Decimal`.
fn validate_draft(draft: &QuotationDraft) -> Result<(), ServiceError> {
    if draft.header.quot_no.trim().is_empty() {
        return Err(ServiceError::ValidationError(
            "Quotation number is required".to_string(),
        ));
    }
    if draft.header.date.is_none() {
        return Err(ServiceError::ValidationError(
            "Quotation date is required".to_string(),
        ));
    }
    if draft.header.lead_id < 0 {
        return Err(ServiceError::InvalidInput(
            "lead_id must not be negative".to_string(),
        ));
    }
    let s = &draft.header.surcharges;
    validate_money("packaging", s.packaging)?;
    validate_money("loading", s.loading)?;
    validate_money("transport", s.transport)?;
    validate_money("unloading", s.unloading)?;
    validate_money("installation", s.installation)?;
    let t = &draft.header.tax_percents;
    validate_money("sgst", t.sgst)?;
    validate_money("cgst", t.cgst)?;
    validate_money("igst", t.igst)?;
    validate_money("service_sgst", t.service_sgst)?;
    validate_money("service_cgst", t.service_cgst)?;
    validate_money("advance", draft.header.advance)?;

    for (i, line) in draft.lines.iter().enumerate() {
        let at = |field: &str| format!("lines[{i}].{field}");
        if line.quantity < 1 {
            return Err(ServiceError::InvalidInput(format!(
                "{} must be at least 1",
                at("quantity")
            )));
        }
        validate_money(&at("unit_price"), line.unit_price)?;
        validate_money(&at("discount_amount"), line.discount_amount)?;
        validate_money(&at("discount_percent"), line.discount_percent)?;
        if line.discount_percent > Decimal::from(100) {
            return Err(ServiceError::InvalidInput(format!(
                "{} must not exceed 100",
                at("discount_percent")
            )));
        }
    }
    Ok(())
}

impl QuotationService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a new quotation. The business key `quot_no` must be unused.
    #[instrument(skip(self, draft), fields(quot_no = %draft.header.quot_no, lead_id = %draft.header.lead_id))]
    pub async fn create_quotation(
        &self,
        draft: QuotationDraft,
    ) -> Result<QuotationResponse, ServiceError> {
        validate_draft(&draft)?;
        let db = &*self.db_pool;

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for quotation creation");
            ServiceError::DatabaseError(e)
        })?;

        let existing = QuotationRowEntity::find()
            .filter(quotation_row::Column::QuotNo.eq(draft.header.quot_no.clone()))
            .count(&txn)
            .await?;
        if existing > 0 {
            return Err(ServiceError::ValidationError(format!(
                "Quotation number {} already exists",
                draft.header.quot_no
            )));
        }

        let quot_id = max_value(&txn, quotation_row::Column::QuotId).await? + 1;
        let quot_no = draft.header.quot_no.clone();
        let response = self.write_document(&txn, draft, quot_id).await?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, quot_no = %quot_no, "Failed to commit quotation creation");
            ServiceError::DatabaseError(e)
        })?;

        counter!("quotation_api_quotations_created_total", 1);
        info!(quot_no = %quot_no, quot_id = quot_id, "Quotation created");
        self.emit(Event::QuotationCreated {
            quot_no,
            quot_id,
        })
        .await;
        Ok(response)
    }

    /// Replaces the quotation stored under `quot_no` with the submitted
    /// document. The old rows are deleted and the new ones inserted in one
    /// transaction, reusing the existing document group id. An unknown
    /// `quot_no` behaves like a create under the number in the path.
    #[instrument(skip(self, draft), fields(quot_no = %quot_no))]
    pub async fn replace_quotation(
        &self,
        quot_no: &str,
        mut draft: QuotationDraft,
    ) -> Result<QuotationResponse, ServiceError> {
        draft.header.quot_no = quot_no.to_string();
        validate_draft(&draft)?;
        let db = &*self.db_pool;

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for quotation replace");
            ServiceError::DatabaseError(e)
        })?;

        let old_rows = QuotationRowEntity::find()
            .filter(quotation_row::Column::QuotNo.eq(quot_no))
            .order_by_asc(quotation_row::Column::Id)
            .all(&txn)
            .await?;

        let quot_id = match old_rows.first() {
            Some(first) => {
                if QuotationStatus::parse(&first.status) == QuotationStatus::Final
                    && draft.header.status == QuotationStatus::Draft
                {
                    warn!(quot_no = %quot_no, "Finalized quotation reverted to draft");
                }
                QuotationRowEntity::delete_many()
                    .filter(quotation_row::Column::QuotNo.eq(quot_no))
                    .exec(&txn)
                    .await?;
                first.quot_id
            }
            None => max_value(&txn, quotation_row::Column::QuotId).await? + 1,
        };

        let response = self.write_document(&txn, draft, quot_id).await?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, quot_no = %quot_no, "Failed to commit quotation replace");
            ServiceError::DatabaseError(e)
        })?;

        counter!("quotation_api_quotations_replaced_total", 1);
        info!(quot_no = %quot_no, quot_id = quot_id, "Quotation replaced");
        self.emit(Event::QuotationReplaced {
            quot_no: quot_no.to_string(),
            quot_id,
        })
        .await;
        Ok(response)
    }

    /// Fetches one quotation by its business key.
    #[instrument(skip(self), fields(quot_no = %quot_no))]
    pub async fn get_quotation(&self, quot_no: &str) -> Result<QuotationResponse, ServiceError> {
        let db = &*self.db_pool;
        let rows = QuotationRowEntity::find()
            .filter(quotation_row::Column::QuotNo.eq(quot_no))
            .order_by_asc(quotation_row::Column::Id)
            .all(db)
            .await?;
        let response = self.assemble_response(db, &rows).await?;
        response.ok_or_else(|| ServiceError::NotFound(format!("Quotation {quot_no} not found")))
    }

    /// Deletes every row of a quotation. Deleting an unknown number is a 404.
    #[instrument(skip(self), fields(quot_no = %quot_no))]
    pub async fn delete_quotation(&self, quot_no: &str) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let result = QuotationRowEntity::delete_many()
            .filter(quotation_row::Column::QuotNo.eq(quot_no))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Quotation {quot_no} not found"
            )));
        }
        counter!("quotation_api_quotations_deleted_total", 1);
        info!(quot_no = %quot_no, rows = result.rows_affected, "Quotation deleted");
        self.emit(Event::QuotationDeleted {
            quot_no: quot_no.to_string(),
        })
        .await;
        Ok(())
    }

    /// Lists quotations grouped by lead, one page of leads at a time, newest
    /// lead first. `search` matches the quotation number or the company name;
    /// a matching lead is returned with all of its revisions. Documents
    /// without a lead (`lead_id = 0`) are unrelated to each other and are not
    /// listed here; they stay reachable by quotation number.
    #[instrument(skip(self))]
    pub async fn list_quotations(
        &self,
        page: u64,
        per_page: u64,
        search: Option<String>,
    ) -> Result<QuotationListResponse, ServiceError> {
        let db = &*self.db_pool;
        let page = page.max(1);

        let mut filter = Condition::all().add(quotation_row::Column::LeadId.gt(0));
        if let Some(term) = search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let company_ids: Vec<i64> = CompanyEntity::find()
                .filter(company::Column::CompanyName.contains(term))
                .select_only()
                .column(company::Column::Id)
                .into_tuple()
                .all(db)
                .await?;
            filter = filter.add(
                Condition::any()
                    .add(quotation_row::Column::QuotNo.contains(term))
                    .add(quotation_row::Column::CustomerId.is_in(company_ids)),
            );
        }

        let paginator = QuotationRowEntity::find()
            .select_only()
            .column(quotation_row::Column::LeadId)
            .distinct()
            .filter(filter)
            .order_by_desc(quotation_row::Column::LeadId)
            .into_tuple::<i64>()
            .paginate(db, per_page);

        let total = paginator.num_items().await.map_err(|e| {
            error!(error = %e, "Failed to count leads");
            ServiceError::DatabaseError(e)
        })?;
        let lead_ids = paginator.fetch_page(page - 1).await.map_err(|e| {
            error!(error = %e, page = page, "Failed to fetch leads page");
            ServiceError::DatabaseError(e)
        })?;

        let mut leads = Vec::with_capacity(lead_ids.len());
        for lead_id in lead_ids {
            let rows = QuotationRowEntity::find()
                .filter(quotation_row::Column::LeadId.eq(lead_id))
                .order_by_asc(quotation_row::Column::Id)
                .all(db)
                .await?;
            let Some((current_group, history_groups)) = materialize::lead_revisions(rows) else {
                continue;
            };
            let Some(current) = self.assemble_response(db, &current_group.rows).await? else {
                continue;
            };
            let mut history = Vec::with_capacity(history_groups.len());
            for group in history_groups {
                if let Some(doc) = self.assemble_response(db, &group.rows).await? {
                    history.push(doc);
                }
            }
            leads.push(LeadQuotationsResponse {
                lead_id,
                current,
                history,
            });
        }

        info!(total = total, page = page, returned = leads.len(), "Quotations listed");
        Ok(QuotationListResponse {
            leads,
            total,
            page,
            per_page,
        })
    }

    /// Recomputes totals, allocates row ids and inserts the materialized
    /// rows. Runs inside the caller's transaction.
    async fn write_document<C: ConnectionTrait>(
        &self,
        txn: &C,
        mut draft: QuotationDraft,
        quot_id: i64,
    ) -> Result<QuotationResponse, ServiceError> {
        let now = Utc::now();
        let customer_id =
            resolve_company(txn, draft.header.customer_id, draft.company_name.as_deref()).await?;
        draft.header.customer_id = customer_id;

        let totals = pricing::recompute_document(
            &mut draft.lines,
            &draft.header.surcharges,
            &draft.header.tax_percents,
            draft.header.advance,
        );

        let base_row_id = max_value(txn, quotation_row::Column::Id).await? + 1;
        let rows =
            materialize::materialize_rows(&draft.header, &draft.lines, &totals, quot_id, base_row_id, now);

        let active_rows: Vec<quotation_row::ActiveModel> = rows
            .into_iter()
            .map(|m| m.into_active_model().reset_all())
            .collect();
        QuotationRowEntity::insert_many(active_rows)
            .exec(txn)
            .await?;

        let company_name = company_name(txn, customer_id).await?;
        Ok(QuotationResponse {
            quot_id,
            header: draft.header,
            company_name,
            lines: draft.lines,
            totals,
        })
    }

    /// Rebuilds a response from stored rows, resolving the company name.
    async fn assemble_response<C: ConnectionTrait>(
        &self,
        db: &C,
        rows: &[quotation_row::Model],
    ) -> Result<Option<QuotationResponse>, ServiceError> {
        let Some((header, lines, totals)) = materialize::assemble_document(rows) else {
            return Ok(None);
        };
        let quot_id = rows[0].quot_id;
        let name = company_name(db, header.customer_id).await?;
        Ok(Some(QuotationResponse {
            quot_id,
            header,
            company_name: name,
            lines,
            totals,
        }))
    }

    async fn emit(&self, event: Event) {
        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(event).await {
                warn!(error = %e, "Failed to send quotation event");
            }
        }
    }
}

/// Highest stored value of an integer column, 0 when the table is empty.
async fn max_value<C: ConnectionTrait>(
    db: &C,
    column: quotation_row::Column,
) -> Result<i64, ServiceError> {
    let max: Option<Option<i64>> = QuotationRowEntity::find()
        .select_only()
        .column_as(Expr::col(column).max(), "max_value")
        .into_tuple()
        .one(db)
        .await?;
    Ok(max.flatten().unwrap_or(0))
}

async fn company_name<C: ConnectionTrait>(
    db: &C,
    customer_id: i64,
) -> Result<Option<String>, ServiceError> {
    if customer_id == 0 {
        return Ok(None);
    }
    let company = CompanyEntity::find_by_id(customer_id).one(db).await?;
    Ok(company.map(|c| c.company_name))
}

/// Resolves the customer reference for a draft. An explicit id is taken as
/// is; otherwise a non-empty company name is looked up and created if
/// missing, inside the surrounding transaction.
async fn resolve_company<C: ConnectionTrait>(
    db: &C,
    customer_id: i64,
    company_name: Option<&str>,
) -> Result<i64, ServiceError> {
    if customer_id != 0 {
        return Ok(customer_id);
    }
    let Some(name) = company_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(0);
    };
    if let Some(existing) = CompanyEntity::find()
        .filter(company::Column::CompanyName.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing.id);
    }
    let created = company::ActiveModel {
        id: ActiveValue::NotSet,
        company_name: Set(name.to_string()),
        contact_person: Set(String::new()),
        contact_no: Set(String::new()),
        email: Set(String::new()),
        address: Set(String::new()),
        city: Set(String::new()),
        state: Set(String::new()),
        created_date: ActiveValue::NotSet,
    }
    .insert(db)
    .await?;
    info!(company_id = created.id, company_name = %name, "Company created from quotation draft");
    Ok(created.id)
}
