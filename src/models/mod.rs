pub mod quotation;

pub use quotation::{
    AddressBlock, LineItem, QuotationHeader, QuotationStatus, QuotationTotals, Surcharges,
    TaxPercents,
};
