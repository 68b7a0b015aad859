use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One physical row of the denormalized quotation table.
///
/// The table stores one row per product line, with every header field
/// duplicated onto each row and a large set of legacy columns that must be
/// populated with defaults to satisfy the schema. This shape is a storage
/// concern only; the logical document model lives in `crate::models`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotation_rows")]
pub struct Model {
    /// Row id, allocated contiguously per write batch (not auto-increment:
    /// the service assigns `max(id)+1 .. +n` inside the write transaction).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Document group id shared by all rows of one revision (one logical
    /// document). Distinct from the business key `quot_no`.
    pub quot_id: i64,
    /// Sales-opportunity grouping key linking revisions of the same deal.
    pub lead_id: i64,
    /// Business-visible quotation number, unique per logical document.
    pub quot_no: String,
    pub s_no: i32,

    // Header: document-level fields, identical across all rows of a quot_no.
    pub date: Option<NaiveDate>,
    pub status: String,
    pub customer_id: i64,
    pub contact_person_name: String,
    pub contact_no: String,
    pub email_id: String,
    pub address: String,
    pub billing_pin_code: String,
    pub billing_building_no: String,
    pub billing_area: String,
    pub billing_landmark: String,
    pub billing_locality: String,
    pub billing_city: String,
    pub billing_state: String,
    pub billing_country: String,
    pub delivery_pin_code: String,
    pub delivery_building_no: String,
    pub delivery_area: String,
    pub delivery_landmark: String,
    pub delivery_locality: String,
    pub delivery_city: String,
    pub delivery_state: String,
    pub delivery_country: String,
    pub term_condition: String,
    pub quotation_sub: String,
    pub remark: String,
    pub activity: String,
    pub next_date: Option<NaiveDate>,
    pub packaging: Decimal,
    pub loading: Decimal,
    pub transport: Decimal,
    pub unloading: Decimal,
    pub installation: Decimal,
    pub transport_in_product: Decimal,
    pub transport_type: String,
    pub installation_type: String,
    pub gst_sgst_per: Decimal,
    pub gst_sgst: Decimal,
    pub gst_cgst_per: Decimal,
    pub gst_cgst: Decimal,
    pub gst_igst_per: Decimal,
    pub gst_igst: Decimal,
    pub gst_service_sgst_per: Decimal,
    pub gst_service_sgst: Decimal,
    pub gst_service_cgst_per: Decimal,
    pub gst_service_cgst: Decimal,
    pub subtotal: Decimal,
    pub grand_total: Decimal,
    pub advance: Decimal,
    pub balance: Decimal,

    // Line: fields belonging to the single product line this row carries.
    pub pro_id: String,
    pub pro_code: String,
    pub pro_image: String,
    pub description_head: String,
    pub pro_dec: String,
    pub hsn_code: String,
    pub size: String,
    pub colour: String,
    pub qty: i32,
    pub mrp: Decimal,
    pub discount: Decimal,
    pub discount_per: Decimal,
    pub total: Decimal,

    // Legacy columns kept only to satisfy the schema; always written with
    // their defaults, never read back into the document model.
    #[sea_orm(column_name = "type")]
    pub record_type: String,
    pub created_source: String,
    pub created_by: String,
    pub employee_id: i64,
    pub edited_by: i64,
    pub edited_no_of_time: i32,
    pub sorted_order: i32,
    pub lbt_per: Decimal,
    pub lbt: Decimal,
    pub oct_per: Decimal,
    pub oct: Decimal,
    pub vat_per: Decimal,
    pub vat: Decimal,
    pub cst_per: Decimal,
    pub cst: Decimal,
    pub commission_per: Decimal,
    pub commission_amount: Decimal,
    pub commission_sts: String,
    pub internal_remark: String,
    pub rate_remark: String,
    pub work_order_no: String,
    pub search_data: String,
    pub approval_status: String,
    pub last_update: DateTime<Utc>,
    pub edited_date: Option<DateTime<Utc>>,
    pub expected_delivery_date: Option<NaiveDate>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CustomerId",
        to = "super::company::Column::Id"
    )]
    Company,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(self)
    }
}
