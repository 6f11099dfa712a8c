#![cfg(feature = "returns")]

use gst_filing::core::*;
use gst_filing::returns::policy::{apportion_itc_claim, classify_itc, split_itc_reversal};
use gst_filing::returns::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn invoice(number: &str, hsn: &str, taxable: Decimal, igst: Decimal) -> InvoiceRecordBuilder {
    InvoiceRecordBuilder::new(number, "2024-05-10", "Acme")
        .amounts(taxable, Decimal::ZERO, Decimal::ZERO, igst)
        .hsn(hsn, format!("item {hsn}"))
}

fn invoices() -> Vec<InvoiceRecord> {
    vec![
        InvoiceRecordBuilder::new("S-1", "2024-05-01", "Acme")
            .amounts(dec!(10000), dec!(900), dec!(900), dec!(0))
            .hsn("8471", "Laptop")
            .quantity(dec!(1), dec!(10000))
            .build(),
        invoice("S-2", "8517", dec!(5000), dec!(900))
            .category(InvoiceCategory::B2C)
            .quantity(dec!(2), dec!(2500))
            .build(),
        invoice("S-3", "998314", dec!(80000), dec!(0))
            .category(InvoiceCategory::Export)
            .build(),
        invoice("S-4", "0401", dec!(3000), dec!(0))
            .category(InvoiceCategory::NilRated)
            .build(),
        invoice("S-5", "8471", dec!(20000), dec!(3600))
            .category(InvoiceCategory::B2B)
            .quantity(dec!(2), dec!(10000))
            .build(),
        invoice("S-6", "", dec!(700), dec!(0)).build(),
    ]
}

// --- GSTR-1 ---

#[test]
fn category_rollup() {
    let rollup = CategoryRollup::compute(&invoices());

    let b2b = rollup.get(InvoiceCategory::B2B);
    assert_eq!(b2b.count, 3);
    assert_eq!(b2b.taxable_value, dec!(30700));
    assert_eq!(b2b.cgst, dec!(900));
    assert_eq!(b2b.igst, dec!(3600));
    assert_eq!(b2b.total_value, dec!(36100));
    assert_eq!(b2b.total_tax(), dec!(5400));

    assert_eq!(rollup.get(InvoiceCategory::B2C).count, 1);
    assert_eq!(rollup.get(InvoiceCategory::Export).taxable_value, dec!(80000));
    assert_eq!(rollup.get(InvoiceCategory::NilRated).total_value, dec!(3000));

    assert_eq!(rollup.total.count, 6);
    assert_eq!(rollup.total.taxable_value, dec!(118700));
}

#[test]
fn category_totals_add_up() {
    let rollup = CategoryRollup::compute(&invoices());
    let (count, taxable, tax) = rollup.iter().fold(
        (0, Decimal::ZERO, Decimal::ZERO),
        |(c, t, x), (_, s)| (c + s.count, t + s.taxable_value, x + s.total_tax()),
    );
    assert_eq!(count, rollup.total.count);
    assert_eq!(taxable, rollup.total.taxable_value);
    assert_eq!(tax, rollup.total.total_tax());
}

#[test]
fn hsn_rollup_order_and_totals() {
    let hsn = hsn_rollup(&invoices());
    let codes: Vec<&str> = hsn.iter().map(|h| h.hsn_code.as_str()).collect();
    assert_eq!(codes, ["8471", "8517", "998314", "0401", HSN_NOT_SPECIFIED]);

    let laptops = &hsn[0];
    assert_eq!(laptops.description, "Laptop");
    assert_eq!(laptops.quantity, dec!(3));
    assert_eq!(laptops.taxable_value, dec!(30000));
    assert_eq!(laptops.tax_amount, dec!(5400));
    assert_eq!(laptops.reference_rate, Some(dec!(18)));

    assert_eq!(hsn[3].reference_rate, Some(dec!(0)));
    assert_eq!(hsn[4].reference_rate, None);
}

#[test]
fn gstr1_summary_counts_statuses() {
    let mut records = validate_invoices(&invoices());
    records.push(invoice("S-7", "8471", dec!(0), dec!(0)).build());
    let summary = Gstr1Summary::compute(&records);
    // S-6 has no HSN code
    assert_eq!(summary.counts.validated, 5);
    assert_eq!(summary.counts.error, 1);
    assert_eq!(summary.counts.pending, 1);
    assert_eq!(summary.categories.total.count, 7);
}

#[test]
fn gstr1_summary_serializes() {
    let summary = Gstr1Summary::compute(&invoices());
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["categories"]["total"]["count"], 6);
    assert_eq!(json["hsn"][0]["hsn_code"], "8471");
}

// --- GSTR-3B ---

#[test]
fn gstr3b_from_invoices() {
    let outward: Vec<OutwardSupplyRecord> = invoices().iter().map(Into::into).collect();
    let summary = Gstr3bSummary::compute(&outward, &[]);

    assert_eq!(summary.table_3_1.taxable_value, dec!(35700));
    assert_eq!(summary.table_3_1.tax.igst, dec!(4500));
    assert_eq!(summary.table_3_1.zero_rated_value, dec!(80000));
    assert_eq!(summary.table_3_1.nil_exempt_value, dec!(3000));
    assert_eq!(summary.net_payable, summary.table_3_1.tax);
}

#[test]
fn gstr3b_cess_is_carried_and_apportioned() {
    let outward = vec![OutwardSupplyRecord::new(
        SupplyType::B2B,
        dec!(100000),
        TaxAmounts::new(dec!(14000), dec!(14000), dec!(0), dec!(12000)),
    )];
    let inward = vec![InwardSupplyRecord::new(
        dec!(50000),
        TaxAmounts::new(dec!(7000), dec!(7000), dec!(0), dec!(6000)),
        dec!(7000),
        dec!(0),
    )];
    let s = Gstr3bSummary::compute(&outward, &inward);
    assert_eq!(s.table_3_1.tax.cess, dec!(12000));
    // half the GST was claimed, so half the cess is claimed too
    assert_eq!(s.table_4.available.cgst, dec!(3500));
    assert_eq!(s.table_4.available.cess, dec!(3000));
    assert_eq!(s.net_payable.cess, dec!(9000));
}

#[test]
fn gstr3b_rounds_apportioned_itc_to_paise() {
    let inward = vec![InwardSupplyRecord::new(
        dec!(1000),
        TaxAmounts::new(dec!(100), dec!(100), dec!(100), dec!(0)),
        dec!(100),
        dec!(0),
    )];
    let t = Table4::compute(&inward);
    assert_eq!(t.available.cgst, dec!(33.33));
    assert_eq!(t.available.igst, dec!(33.33));
}

#[test]
fn table5_only_counts_untaxed_inward() {
    let inward = vec![
        InwardSupplyRecord::new(dec!(1000), TaxAmounts::ZERO, dec!(0), dec!(0)),
        InwardSupplyRecord::new(
            dec!(2000),
            TaxAmounts::new(dec!(0), dec!(0), dec!(0), dec!(10)),
            dec!(0),
            dec!(0),
        ),
    ];
    assert_eq!(Table5::compute(&inward).exempt_nil_value, dec!(1000));
}

// --- Policy ---

#[test]
fn policy_reference_values() {
    assert_eq!(
        classify_itc(dec!(125000), dec!(130000)),
        (ItcStatus::ExcessClaim, RiskLevel::Medium)
    );
    assert_eq!(
        classify_itc(dec!(125000), dec!(140000)),
        (ItcStatus::ExcessClaim, RiskLevel::High)
    );
    assert_eq!(
        classify_itc(dec!(125000), dec!(100000)),
        (ItcStatus::UnderClaim, RiskLevel::Low)
    );

    let split = split_itc_reversal(dec!(2000));
    assert_eq!((split.cgst, split.sgst), (dec!(1000), dec!(1000)));

    let claim = apportion_itc_claim(&InwardSupplyRecord::new(
        dec!(10000),
        TaxAmounts::new(dec!(0), dec!(0), dec!(1800), dec!(0)),
        dec!(900),
        dec!(0),
    ));
    assert_eq!(claim.igst, dec!(900));
}

// --- GSTR-9 ---

#[test]
fn gstr9_flags_excess_claims() {
    let inward = vec![InwardSupplyRecord::new(
        dec!(1000000),
        TaxAmounts::new(dec!(90000), dec!(90000), dec!(0), dec!(0)),
        dec!(180000),
        dec!(0),
    )];
    let available = TaxAmounts::new(dec!(80000), dec!(90000), dec!(0), dec!(0));
    let s = Gstr9Summary::compute(&[], &inward, &available);

    assert_eq!(s.total_turnover(), Decimal::ZERO);
    assert_eq!(s.itc_availed.cgst, dec!(90000));
    let cgst = s.itc_analysis.get(TaxHead::Cgst).unwrap();
    assert_eq!(cgst.status, ItcStatus::ExcessClaim);
    assert_eq!(cgst.risk, RiskLevel::High);
    assert_eq!(cgst.difference, dec!(10000));
    assert_eq!(
        s.itc_analysis.get(TaxHead::Sgst).unwrap().status,
        ItcStatus::Compliant
    );
    assert_eq!(s.itc_analysis.overall_risk(), RiskLevel::High);
    assert!(s.net_payable.is_zero());
}

#[test]
fn analysis_covers_every_head() {
    let analysis = analyze_itc(&TaxAmounts::ZERO, &TaxAmounts::ZERO);
    let heads: Vec<TaxHead> = analysis.heads.iter().map(|h| h.head).collect();
    assert_eq!(heads, TaxHead::ALL.to_vec());
    assert!(analysis.is_compliant());
}
