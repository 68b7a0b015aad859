//! Property-based tests for the pricing rules.
//!
//! These tests use proptest to verify the money invariants across a wide
//! range of inputs, helping to catch edge cases that unit tests might miss.

use proptest::prelude::*;
use rust_decimal::Decimal;

use quotation_api::models::{Surcharges, TaxPercents};
use quotation_api::services::pricing::{line_total, quotation_totals, round_money};

// Strategies for generating test data

fn money_strategy() -> impl Strategy<Value = Decimal> {
    // amounts up to 10_000.00 in whole cents
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn percent_strategy() -> impl Strategy<Value = Decimal> {
    // 0.00% to 100.00%
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn quantity_strategy() -> impl Strategy<Value = i32> {
    1i32..1_000
}

fn has_at_most_two_decimals(value: Decimal) -> bool {
    (value * Decimal::from(100)).fract().is_zero()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn undiscounted_total_is_quantity_times_price_rounded(
        qty in quantity_strategy(),
        price in money_strategy(),
    ) {
        let expected = round_money(Decimal::from(qty) * price);
        prop_assert_eq!(line_total(qty, price, Decimal::ZERO, Decimal::ZERO), expected);
    }

    #[test]
    fn line_total_is_never_negative(
        qty in quantity_strategy(),
        price in money_strategy(),
        flat in money_strategy(),
        percent in percent_strategy(),
    ) {
        let total = line_total(qty, price, flat, percent);
        prop_assert!(total >= Decimal::ZERO, "negative total: {total}");
    }

    #[test]
    fn line_total_is_rounded_to_cents(
        qty in quantity_strategy(),
        price in money_strategy(),
        flat in money_strategy(),
        percent in percent_strategy(),
    ) {
        let total = line_total(qty, price, flat, percent);
        prop_assert!(has_at_most_two_decimals(total), "unrounded total: {total}");
    }

    #[test]
    fn percentage_discount_ignores_flat_amount(
        qty in quantity_strategy(),
        price in money_strategy(),
        flat_a in money_strategy(),
        flat_b in money_strategy(),
        percent in percent_strategy(),
    ) {
        prop_assume!(percent > Decimal::ZERO);
        let a = line_total(qty, price, flat_a, percent);
        let b = line_total(qty, price, flat_b, percent);
        prop_assert_eq!(a, b, "flat amount leaked into a percentage discount");
    }

    #[test]
    fn discounted_total_never_exceeds_raw_total(
        qty in quantity_strategy(),
        price in money_strategy(),
        flat in money_strategy(),
        percent in percent_strategy(),
    ) {
        let raw = line_total(qty, price, Decimal::ZERO, Decimal::ZERO);
        let discounted = line_total(qty, price, flat, percent);
        prop_assert!(discounted <= raw);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn grand_total_is_the_exact_sum_of_its_rounded_parts(
        line_a in money_strategy(),
        line_b in money_strategy(),
        packaging in money_strategy(),
        transport in money_strategy(),
        sgst in percent_strategy(),
        cgst in percent_strategy(),
        igst in percent_strategy(),
        advance in money_strategy(),
    ) {
        let surcharges = Surcharges {
            packaging,
            transport,
            ..Default::default()
        };
        let taxes = TaxPercents { sgst, cgst, igst, ..Default::default() };
        let totals = quotation_totals(&[line_a, line_b], &surcharges, &taxes, advance);

        // every component is already at cent precision, so the final
        // roundings must be exact
        let expected_grand = totals.subtotal
            + packaging
            + transport
            + totals.sgst_amount
            + totals.cgst_amount
            + totals.igst_amount
            + totals.service_sgst_amount
            + totals.service_cgst_amount;
        prop_assert_eq!(totals.grand_total, expected_grand);
        prop_assert_eq!(totals.balance, totals.grand_total - advance);
        prop_assert_eq!(totals.subtotal, line_a + line_b);
    }

    #[test]
    fn totals_are_all_rounded_to_cents(
        line_a in money_strategy(),
        line_b in money_strategy(),
        sgst in percent_strategy(),
        service_cgst in percent_strategy(),
        advance in money_strategy(),
    ) {
        let taxes = TaxPercents { sgst, service_cgst, ..Default::default() };
        let totals = quotation_totals(&[line_a, line_b], &Surcharges::default(), &taxes, advance);
        for value in [
            totals.subtotal,
            totals.sgst_amount,
            totals.service_cgst_amount,
            totals.grand_total,
            totals.balance,
        ] {
            prop_assert!(has_at_most_two_decimals(value), "unrounded: {}", value);
        }
    }

    #[test]
    fn rounding_is_idempotent(cents in 0i64..10_000_000, scale in 0u32..10) {
        let value = Decimal::new(cents, scale);
        let once = round_money(value);
        prop_assert_eq!(once, round_money(once));
    }
}
