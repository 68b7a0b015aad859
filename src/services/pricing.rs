//! Pure pricing arithmetic: the per-line total rule and the document-level
//! aggregation. Both are total functions over their inputs; all error
//! handling lives at the validation/persistence boundary.
//!
//! Rounding contract for the whole system: half-up
//! (`MidpointAwayFromZero`) to 2 decimal places, applied independently at
//! every step. Accumulated per-step rounding is intended behavior.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{LineItem, QuotationTotals, Surcharges, TaxPercents};

/// Round a monetary amount to 2 decimal places, half-up.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Line Total Rule.
///
/// `raw = quantity * unit_price`. A percentage discount wins over a flat
/// amount; they are never combined. The result is clamped at zero and then
/// rounded. Negative inputs are rejected upstream; the clamp remains as the
/// last line of defense.
pub fn line_total(
    quantity: i32,
    unit_price: Decimal,
    discount_amount: Decimal,
    discount_percent: Decimal,
) -> Decimal {
    let raw = Decimal::from(quantity) * unit_price;
    let discounted = if discount_percent > Decimal::ZERO {
        raw - raw * discount_percent / Decimal::from(100)
    } else if discount_amount > Decimal::ZERO {
        raw - discount_amount
    } else {
        raw
    };
    round_money(discounted.max(Decimal::ZERO))
}

/// Recompute a line's total from its own fields.
pub fn recompute_line(line: &LineItem) -> Decimal {
    line_total(
        line.quantity,
        line.unit_price,
        line.discount_amount,
        line.discount_percent,
    )
}

/// Quotation Aggregator.
///
/// Sums the (already rounded) line totals, applies each of the five
/// independent tax percentages to the subtotal, adds the flat surcharges and
/// subtracts the advance. Every intermediate value is rounded on its own.
/// A full recompute runs on any input change; there is no delta update.
pub fn quotation_totals(
    line_totals: &[Decimal],
    surcharges: &Surcharges,
    taxes: &TaxPercents,
    advance: Decimal,
) -> QuotationTotals {
    let hundred = Decimal::from(100);
    let subtotal = round_money(line_totals.iter().copied().sum());

    let sgst_amount = round_money(subtotal * taxes.sgst / hundred);
    let cgst_amount = round_money(subtotal * taxes.cgst / hundred);
    let igst_amount = round_money(subtotal * taxes.igst / hundred);
    let service_sgst_amount = round_money(subtotal * taxes.service_sgst / hundred);
    let service_cgst_amount = round_money(subtotal * taxes.service_cgst / hundred);

    let grand_total = round_money(
        subtotal
            + surcharges.packaging
            + surcharges.loading
            + surcharges.transport
            + surcharges.unloading
            + surcharges.installation
            + sgst_amount
            + cgst_amount
            + igst_amount
            + service_sgst_amount
            + service_cgst_amount,
    );
    let balance = round_money(grand_total - advance);

    QuotationTotals {
        subtotal,
        sgst_amount,
        cgst_amount,
        igst_amount,
        service_sgst_amount,
        service_cgst_amount,
        grand_total,
        balance,
    }
}

/// Recompute every line total plus the document totals in one pass.
pub fn recompute_document(
    lines: &mut [LineItem],
    surcharges: &Surcharges,
    taxes: &TaxPercents,
    advance: Decimal,
) -> QuotationTotals {
    for line in lines.iter_mut() {
        line.computed_total = recompute_line(line);
    }
    let line_totals: Vec<Decimal> = lines.iter().map(|l| l.computed_total).collect();
    quotation_totals(&line_totals, surcharges, taxes, advance)
}
