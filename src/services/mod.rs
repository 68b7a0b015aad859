pub mod companies;
pub mod materialize;
pub mod pricing;
pub mod quotations;

pub use companies::CompanyService;
pub use quotations::QuotationService;
