//! GSTR-3B tables 3.1, 4 and 5, and net tax payable.

use rust_decimal::Decimal;
use serde::Serialize;

use super::policy::{apportion_itc_claim, round_money, split_itc_reversal};
use crate::core::{InwardSupplyRecord, OutwardBucket, OutwardSupplyRecord, TaxAmounts};

/// Table 3.1: details of outward supplies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Table31 {
    /// 3.1(a) taxable value of supplies other than zero rated, nil rated and exempted.
    pub taxable_value: Decimal,
    /// Tax per head on every supply except exports and exempt supplies
    /// (nil rated supplies included).
    pub tax: TaxAmounts,
    /// 3.1(b) taxable value of zero rated supplies.
    pub zero_rated_value: Decimal,
    /// 3.1(c) value of nil rated and exempted supplies.
    pub nil_exempt_value: Decimal,
}

impl Table31 {
    pub fn compute(outward: &[OutwardSupplyRecord]) -> Self {
        let mut table = Self::default();
        for record in outward {
            match record.supply_type.bucket() {
                OutwardBucket::Taxable => table.taxable_value += record.taxable_value,
                OutwardBucket::ZeroRated => table.zero_rated_value += record.taxable_value,
                OutwardBucket::NilExempt => table.nil_exempt_value += record.taxable_value,
            }
        }
        table.tax = outward
            .iter()
            .filter(|r| r.supply_type.counts_toward_outward_tax())
            .map(OutwardSupplyRecord::tax_amounts)
            .sum();
        table
    }

    /// Value of all outward supplies.
    pub fn total_value(&self) -> Decimal {
        self.taxable_value + self.zero_rated_value + self.nil_exempt_value
    }
}

/// Table 4: eligible ITC.
///
/// Apportioned availability and the reversal split are each rounded to
/// paise (half away from zero) before `net` is taken, so net payable is
/// computed from rounded ITC figures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Table4 {
    /// ITC available (claimed), apportioned per head.
    pub available: TaxAmounts,
    /// ITC reversed, split per head.
    pub reversed: TaxAmounts,
    /// Available minus reversed.
    pub net: TaxAmounts,
}

impl Table4 {
    pub fn compute(inward: &[InwardSupplyRecord]) -> Self {
        let available: TaxAmounts = inward.iter().map(apportion_itc_claim).sum();
        let reversed = split_itc_reversal(inward.iter().map(|r| r.itc_reversed).sum());

        let available = available.map(|_, v| round_money(v));
        let reversed = reversed.map(|_, v| round_money(v));
        let net = available.map(|head, v| v - reversed.get(head));

        Self {
            available,
            reversed,
            net,
        }
    }
}

/// Table 5: exempt, nil rated and non-GST inward supplies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Table5 {
    /// Taxable value of inward supplies that carry no tax at all.
    pub exempt_nil_value: Decimal,
}

impl Table5 {
    pub fn compute(inward: &[InwardSupplyRecord]) -> Self {
        Self {
            exempt_nil_value: inward
                .iter()
                .filter(|r| r.tax_amounts().is_zero())
                .map(|r| r.taxable_value)
                .sum(),
        }
    }
}

/// The GSTR-3B monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gstr3bSummary {
    pub table_3_1: Table31,
    pub table_4: Table4,
    pub table_5: Table5,
    /// Per head: `max(0, outward tax − ITC claimed)`.
    pub net_payable: TaxAmounts,
}

impl Gstr3bSummary {
    pub fn compute(outward: &[OutwardSupplyRecord], inward: &[InwardSupplyRecord]) -> Self {
        let table_3_1 = Table31::compute(outward);
        let table_4 = Table4::compute(inward);
        let net_payable = net_payable(&table_3_1.tax, &table_4.available);

        Self {
            table_3_1,
            table_4,
            table_5: Table5::compute(inward),
            net_payable,
        }
    }

    /// Total cash payable across heads.
    pub fn total_payable(&self) -> Decimal {
        self.net_payable.total()
    }
}

/// Per head `max(0, outward − claimed)`.
pub fn net_payable(outward_tax: &TaxAmounts, itc_claimed: &TaxAmounts) -> TaxAmounts {
    outward_tax.map(|head, tax| (tax - itc_claimed.get(head)).max(Decimal::ZERO))
}
