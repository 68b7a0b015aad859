use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Document status. The schema permits moving back from `Final` to `Draft`;
/// the service logs that transition but does not reject it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    #[default]
    Draft,
    Final,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Final => "final",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "final" => Self::Final,
            _ => Self::Draft,
        }
    }
}

/// One of the two fixed locality blocks on a quotation header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddressBlock {
    #[serde(default)]
    pub pin_code: String,
    #[serde(default)]
    pub building_no: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub landmark: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}

/// Header-level flat surcharges added on top of the line subtotal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Surcharges {
    #[serde(default)]
    pub packaging: Decimal,
    #[serde(default)]
    pub loading: Decimal,
    #[serde(default)]
    pub transport: Decimal,
    #[serde(default)]
    pub unloading: Decimal,
    #[serde(default)]
    pub installation: Decimal,
}

/// The five independent GST percentage lines. They are not mutually
/// exclusive; all five may be nonzero at once and their amounts are summed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaxPercents {
    #[serde(default)]
    pub sgst: Decimal,
    #[serde(default)]
    pub cgst: Decimal,
    #[serde(default)]
    pub igst: Decimal,
    #[serde(default)]
    pub service_sgst: Decimal,
    #[serde(default)]
    pub service_cgst: Decimal,
}

/// Document-level fields shared by every line of one quotation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuotationHeader {
    pub quot_no: String,
    pub lead_id: i64,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: QuotationStatus,
    #[serde(default)]
    pub customer_id: i64,
    #[serde(default)]
    pub contact_person_name: String,
    #[serde(default)]
    pub contact_no: String,
    #[serde(default)]
    pub email_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub billing: AddressBlock,
    #[serde(default)]
    pub delivery: AddressBlock,
    #[serde(default)]
    pub terms: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub activity: String,
    pub next_date: Option<NaiveDate>,
    #[serde(default)]
    pub surcharges: Surcharges,
    #[serde(default)]
    pub tax_percents: TaxPercents,
    #[serde(default)]
    pub advance: Decimal,
}

/// One product line of a quotation.
///
/// `computed_total` is derived; it is recomputed server-side on every write
/// and must always match the Line Total Rule within 2 decimal places.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    /// Product reference; empty for ad-hoc lines.
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub description_head: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hsn_code: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub colour: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub computed_total: Decimal,
    pub image_path: Option<String>,
}

/// Aggregated monetary totals for one quotation document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuotationTotals {
    pub subtotal: Decimal,
    pub sgst_amount: Decimal,
    pub cgst_amount: Decimal,
    pub igst_amount: Decimal,
    pub service_sgst_amount: Decimal,
    pub service_cgst_amount: Decimal,
    pub grand_total: Decimal,
    pub balance: Decimal,
}
