//! Property-based tests for parsing, validation and aggregation.
//!
//! Run with: `cargo test --features all --test proptest_tests`

#![cfg(all(feature = "ingest", feature = "returns"))]

use gst_filing::core::*;
use gst_filing::ingest::{TEMPLATE_HEADERS, parse_invoices};
use gst_filing::returns::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn money() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000, 0u32..=2).prop_map(|(n, scale)| Decimal::new(n, scale))
}

fn any_decimal() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, negative, scale)| Decimal::from_parts(lo, mid, hi, negative, scale))
}

fn category() -> impl Strategy<Value = Option<InvoiceCategory>> {
    prop_oneof![
        Just(None),
        Just(Some(InvoiceCategory::B2B)),
        Just(Some(InvoiceCategory::B2C)),
        Just(Some(InvoiceCategory::Export)),
        Just(Some(InvoiceCategory::NilRated)),
    ]
}

fn gstin() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9A-Z]Z[0-9A-Z]",
        "[0-9A-Za-z]{0,16}",
    ]
}

prop_compose! {
    fn invoice()(
        number in "[A-Z0-9-]{0,8}",
        date in prop_oneof![Just("2024-04-15"), Just("15/04/2024"), Just(""), Just("April")],
        customer in "[A-Za-z ]{0,12}",
        gstin in gstin(),
        hsn in prop_oneof![Just(""), Just("8471"), Just("8517"), Just("9983"), Just("1234")],
        taxable in money(),
        cgst in money(),
        sgst in money(),
        igst in money(),
        value in prop::option::of(money()),
        category in category(),
    ) -> InvoiceRecord {
        let mut builder = InvoiceRecordBuilder::new(number, date, customer)
            .gstin(gstin)
            .amounts(taxable, cgst, sgst, igst)
            .hsn(hsn, "item");
        if let Some(value) = value {
            builder = builder.invoice_value(value);
        }
        if let Some(category) = category {
            builder = builder.category(category);
        }
        builder.build()
    }
}

fn csv_field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .-]{0,6}"
}

/// A data row: `true` when it has every column.
fn csv_row() -> impl Strategy<Value = (bool, String)> {
    let columns = TEMPLATE_HEADERS.len();
    (
        "[A-Z]{1,3}-[0-9]{1,4}",
        prop::collection::vec(csv_field(), 0..columns + 2),
    )
        .prop_map(move |(number, rest)| {
            let full = rest.len() + 1 >= columns;
            let mut fields = vec![number];
            fields.extend(rest);
            (full, fields.join(","))
        })
}

proptest! {
    #[test]
    fn parser_keeps_full_rows_only(rows in prop::collection::vec(csv_row(), 0..30)) {
        let mut text = TEMPLATE_HEADERS.join(",");
        text.push('\n');
        for (_, row) in &rows {
            text.push_str(row);
            text.push('\n');
        }

        let records = parse_invoices(&text).unwrap();
        let full: Vec<&String> = rows.iter().filter(|(f, _)| *f).map(|(_, r)| r).collect();
        prop_assert_eq!(records.len(), full.len());
        for (record, row) in records.iter().zip(full) {
            prop_assert_eq!(record.status, RecordStatus::Pending);
            prop_assert!(row.starts_with(record.invoice_number.as_str()));
        }
    }

    #[test]
    fn status_error_iff_errors(records in prop::collection::vec(invoice(), 0..20)) {
        for record in validate_invoices(&records) {
            prop_assert_ne!(record.status, RecordStatus::Pending);
            prop_assert_eq!(record.status == RecordStatus::Error, !record.errors.is_empty());
        }
    }

    #[test]
    fn validated_records_satisfy_rules(records in prop::collection::vec(invoice(), 0..20)) {
        for record in validate_invoices(&records).iter().filter(|r| r.is_validated()) {
            prop_assert!(record.taxable_value > Decimal::ZERO);
            prop_assert!(!record.invoice_number.trim().is_empty());
            prop_assert!(!record.hsn_code.trim().is_empty());
            let diff = (record.taxable_value + record.total_tax() - record.invoice_value).abs();
            prop_assert!(diff <= Decimal::ONE);
        }
    }

    #[test]
    fn grand_total_conserves_taxable_value(records in prop::collection::vec(invoice(), 0..40)) {
        let rollup = CategoryRollup::compute(&records);
        let taxable: Decimal = records.iter().map(|r| r.taxable_value).sum();
        prop_assert_eq!(rollup.total.taxable_value, taxable);
        prop_assert_eq!(rollup.total.count, records.len());

        let by_category: usize = rollup.iter().map(|(_, s)| s.count).sum();
        prop_assert_eq!(by_category, records.len());

        let hsn_taxable: Decimal = hsn_rollup(&records).iter().map(|h| h.taxable_value).sum();
        prop_assert_eq!(hsn_taxable, taxable);
    }

    #[test]
    fn aggregation_is_idempotent(records in prop::collection::vec(invoice(), 0..30)) {
        prop_assert_eq!(Gstr1Summary::compute(&records), Gstr1Summary::compute(&records));

        let outward: Vec<OutwardSupplyRecord> = records.iter().map(Into::into).collect();
        prop_assert_eq!(
            Gstr3bSummary::compute(&outward, &[]),
            Gstr3bSummary::compute(&outward, &[])
        );

        let once = validate_invoices(&records);
        let twice = validate_invoices(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn validation_never_panics_on_extreme_amounts(
        amounts in prop::collection::vec(any_decimal(), 5),
    ) {
        let record = InvoiceRecordBuilder::new("INV-1", "2024-04-15", "Acme")
            .amounts(amounts[0], amounts[1], amounts[2], amounts[3])
            .invoice_value(amounts[4])
            .hsn("8471", "item")
            .build();
        let out = validate_record(&record);
        prop_assert_eq!(out.status == RecordStatus::Error, !out.errors.is_empty());
        if amounts.iter().any(|a| a.abs() > MAX_AMOUNT) {
            prop_assert_eq!(out.status, RecordStatus::Error);
        }
    }

    #[test]
    fn generated_gstins_pass(gstin in "[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9A-Z]Z[0-9A-Z]") {
        prop_assert!(validate_gstin(&gstin).is_ok());
        prop_assert!(validate_gstin(&gstin.to_lowercase()).is_err());
        prop_assert!(validate_gstin(&gstin[..14]).is_err());
    }

    #[test]
    fn net_payable_never_negative(
        outward in prop::collection::vec((money(), money(), money()), 0..10),
        inward in prop::collection::vec((money(), money(), money(), money()), 0..10),
    ) {
        let outward: Vec<OutwardSupplyRecord> = outward
            .into_iter()
            .map(|(taxable, cgst, igst)| {
                OutwardSupplyRecord::new(
                    SupplyType::B2B,
                    taxable,
                    TaxAmounts::new(cgst, cgst, igst, Decimal::ZERO),
                )
            })
            .collect();
        let inward: Vec<InwardSupplyRecord> = inward
            .into_iter()
            .map(|(taxable, cgst, igst, claimed)| {
                InwardSupplyRecord::new(
                    taxable,
                    TaxAmounts::new(cgst, cgst, igst, Decimal::ZERO),
                    claimed,
                    Decimal::ZERO,
                )
            })
            .collect();

        let summary = Gstr3bSummary::compute(&outward, &inward);
        for head in TaxHead::ALL {
            prop_assert!(summary.net_payable.get(head) >= Decimal::ZERO);
            prop_assert!(summary.net_payable.get(head) <= summary.table_3_1.tax.get(head));
        }
    }
}
