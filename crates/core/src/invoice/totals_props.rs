//! Property-based tests for invoice recalculation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use folio_shared::format::{MAX_AMOUNT, round_money};
use folio_shared::types::{Currency, RoomType, SubtotalPolicy};

use super::totals::{recalculate, recalculate_walk_in};
use super::types::{
    ChargeItem, GuestDetails, InvoiceInput, InvoiceRecord, PaymentDetails, PaymentMethod,
    ReceiptId, WalkInInput, WalkInRecord,
};
use crate::words::INVALID_AMOUNT;

/// Strategy for a money amount from 0.00 to 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a tax percentage from 0.0 to 30.0.
fn tax_percentage() -> impl Strategy<Value = Decimal> {
    (0i64..300i64).prop_map(|tenths| Decimal::new(tenths, 1))
}

/// Strategy for any representable decimal, sign and scale included.
fn any_decimal() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, negative, scale)| {
            Decimal::from_parts(lo, mid, hi, negative, scale)
        })
}

fn policy() -> impl Strategy<Value = SubtotalPolicy> {
    prop_oneof![
        Just(SubtotalPolicy::ClampToZero),
        Just(SubtotalPolicy::AllowNegative)
    ]
}

fn charges() -> impl Strategy<Value = Vec<ChargeItem>> {
    prop::collection::vec(amount(), 0..6).prop_map(|amounts| {
        amounts
            .into_iter()
            .map(|amount| ChargeItem::new("Extra", amount))
            .collect()
    })
}

prop_compose! {
    fn invoice_input()(
        nights in 1u32..60,
        rate in amount(),
        charges in charges(),
        discount in amount(),
        tax in tax_percentage(),
        usd in any::<bool>(),
        subtotal_policy in policy(),
    ) -> InvoiceInput {
        InvoiceInput {
            receipt_id: ReceiptId::from("RCPT-PROP"),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            guest: GuestDetails::default(),
            room_type: RoomType::Standard,
            room_number: "101".into(),
            nights,
            rate_per_night: rate,
            charges,
            discount,
            tax_percentage: tax,
            currency: if usd { Currency::Usd } else { Currency::Ngn },
            payment: PaymentDetails::default(),
            received_by: "Ann".into(),
            subtotal_policy,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// subtotal = nights × rate + Σ charges − discount, floored under ClampToZero.
    #[test]
    fn prop_subtotal_formula(input in invoice_input()) {
        let raw = Decimal::from(input.nights) * input.rate_per_night
            + input.charges.iter().map(|c| c.amount).sum::<Decimal>()
            - input.discount;
        let expected = match input.subtotal_policy {
            SubtotalPolicy::ClampToZero => raw.max(Decimal::ZERO),
            SubtotalPolicy::AllowNegative => raw,
        };

        let record = InvoiceRecord::new(input);
        prop_assert_eq!(record.totals().subtotal, expected);
    }

    /// amount_received = subtotal + rounded tax.
    #[test]
    fn prop_amount_received_is_subtotal_plus_tax(input in invoice_input()) {
        let tax_percentage = input.tax_percentage;
        let record = InvoiceRecord::new(input);
        let totals = record.totals();

        prop_assert_eq!(
            totals.tax_amount,
            round_money(totals.subtotal * tax_percentage / Decimal::ONE_HUNDRED)
        );
        prop_assert_eq!(totals.amount_received, totals.subtotal + totals.tax_amount);
    }

    /// Under the default policy no derived field is negative.
    #[test]
    fn prop_clamped_totals_non_negative(mut input in invoice_input()) {
        input.subtotal_policy = SubtotalPolicy::ClampToZero;
        let record = InvoiceRecord::new(input);
        let totals = record.totals();

        prop_assert!(totals.room_charge >= Decimal::ZERO);
        prop_assert!(totals.additional_charges >= Decimal::ZERO);
        prop_assert!(totals.subtotal >= Decimal::ZERO);
        prop_assert!(totals.tax_amount >= Decimal::ZERO);
        prop_assert!(totals.amount_received >= Decimal::ZERO);
    }

    /// recalculate(recalculate(r)) == recalculate(r), and raw fields survive.
    #[test]
    fn prop_recalculate_idempotent(input in invoice_input()) {
        let record = InvoiceRecord::new(input.clone());
        let once = recalculate(&record);
        let twice = recalculate(&once);

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.input(), &input);
    }

    /// Any raw values, however large or negative, produce in-range totals.
    #[test]
    fn prop_extreme_inputs_are_coerced(
        mut input in invoice_input(),
        nights in any::<u32>(),
        rate in any_decimal(),
        discount in any_decimal(),
        tax in any_decimal(),
        extra in prop::collection::vec(any_decimal(), 0..4),
    ) {
        input.subtotal_policy = SubtotalPolicy::ClampToZero;
        input.nights = nights;
        input.rate_per_night = rate;
        input.discount = discount;
        input.tax_percentage = tax;
        input.charges = extra
            .into_iter()
            .map(|amount| ChargeItem::new("Extra", amount))
            .collect();

        let record = InvoiceRecord::new(input);
        let totals = record.totals();

        prop_assert!(record.input().nights >= 1);
        prop_assert!(record.input().rate_per_night <= MAX_AMOUNT);
        prop_assert!(totals.amount_received >= Decimal::ZERO);
        prop_assert_ne!(totals.amount_in_words.as_str(), INVALID_AMOUNT);
    }

    /// Walk-in balance = subtotal − amount paid, recalculation idempotent.
    #[test]
    fn prop_walk_in_balance(charges in charges(), paid in amount()) {
        let input = WalkInInput {
            receipt_id: ReceiptId::from("WLK-PROP"),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            customer_name: String::new(),
            cashier: "Ben".into(),
            currency: Currency::Ngn,
            payment_method: PaymentMethod::Cash,
            charges,
            amount_paid: paid,
        };
        let record = WalkInRecord::new(input);

        prop_assert_eq!(record.totals().balance, record.totals().subtotal - paid);
        prop_assert_eq!(recalculate_walk_in(&record), record);
    }
}
