pub mod company;
pub mod quotation_row;
