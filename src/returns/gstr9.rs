//! GSTR-9 annual return: turnover, tax, ITC and the ITC compliance check.

use rust_decimal::Decimal;
use serde::Serialize;

use super::gstr3b::{Table31, Table4, net_payable};
use super::policy::{ItcStatus, RiskLevel, classify_itc};
use crate::core::{InwardSupplyRecord, OutwardSupplyRecord, TaxAmounts, TaxHead};

/// Claimed against available ITC for one tax head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItcHeadAnalysis {
    pub head: TaxHead,
    /// ITC available as per GSTR-2B.
    pub available: Decimal,
    /// ITC claimed in the returns.
    pub claimed: Decimal,
    /// `claimed − available`; positive means excess claim.
    pub difference: Decimal,
    pub status: ItcStatus,
    pub risk: RiskLevel,
}

/// Per-head ITC compliance, in [`TaxHead::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItcAnalysis {
    pub heads: Vec<ItcHeadAnalysis>,
}

impl ItcAnalysis {
    pub fn get(&self, head: TaxHead) -> Option<&ItcHeadAnalysis> {
        self.heads.iter().find(|h| h.head == head)
    }

    /// Highest risk across heads (`Low` when empty).
    pub fn overall_risk(&self) -> RiskLevel {
        self.heads
            .iter()
            .map(|h| h.risk)
            .max()
            .unwrap_or(RiskLevel::Low)
    }

    pub fn is_compliant(&self) -> bool {
        self.heads.iter().all(|h| h.status == ItcStatus::Compliant)
    }

    /// Heads where more was claimed than available.
    pub fn excess_claims(&self) -> impl Iterator<Item = &ItcHeadAnalysis> {
        self.heads
            .iter()
            .filter(|h| h.status == ItcStatus::ExcessClaim)
    }
}

/// Classify the claim for every tax head.
pub fn analyze_itc(available: &TaxAmounts, claimed: &TaxAmounts) -> ItcAnalysis {
    let heads = TaxHead::ALL
        .into_iter()
        .map(|head| {
            let available = available.get(head);
            let claimed = claimed.get(head);
            let (status, risk) = classify_itc(available, claimed);
            ItcHeadAnalysis {
                head,
                available,
                claimed,
                difference: claimed - available,
                status,
                risk,
            }
        })
        .collect();
    ItcAnalysis { heads }
}

/// The GSTR-9 annual summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gstr9Summary {
    /// Outward supplies by bucket, with tax on the taxable bucket.
    pub outward: Table31,
    /// Tax payable on outward supplies, per head.
    pub tax_payable: TaxAmounts,
    /// ITC availed per head (apportioned from inward supplies).
    pub itc_availed: TaxAmounts,
    pub itc_reversed: TaxAmounts,
    /// Per head `max(0, tax payable − ITC availed)`.
    pub net_payable: TaxAmounts,
    /// ITC availed checked against the GSTR-2B figure.
    pub itc_analysis: ItcAnalysis,
}

impl Gstr9Summary {
    /// Build the annual summary. `available_2b` is the ITC available per
    /// GSTR-2B for the year, supplied by the caller.
    pub fn compute(
        outward: &[OutwardSupplyRecord],
        inward: &[InwardSupplyRecord],
        available_2b: &TaxAmounts,
    ) -> Self {
        let outward = Table31::compute(outward);
        let itc = Table4::compute(inward);
        let tax_payable = outward.tax;

        Self {
            net_payable: net_payable(&tax_payable, &itc.available),
            itc_analysis: analyze_itc(available_2b, &itc.available),
            outward,
            tax_payable,
            itc_availed: itc.available,
            itc_reversed: itc.reversed,
        }
    }

    /// Value of all outward supplies for the year.
    pub fn total_turnover(&self) -> Decimal {
        self.outward.total_value()
    }
}
