//! Simplified ITC policy: claim apportionment, reversal split and
//! compliance thresholds. These are not the statutory formulas.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::{InwardSupplyRecord, TaxAmounts};

/// Claims below this share of the available ITC count as under-claimed (90 %).
pub const UNDER_CLAIM_RATIO: Decimal = Decimal::from_parts(90, 0, 0, false, 2);

/// Claims above this share of the available ITC are high risk (110 %).
pub const HIGH_RISK_RATIO: Decimal = Decimal::from_parts(110, 0, 0, false, 2);

/// Split an inward record's total claimed ITC across tax heads in
/// proportion to the CGST / SGST / IGST paid on it.
///
/// `claimed_head = head_amount × itc_claimed / (cgst + sgst + igst)`.
/// Cess is apportioned with the same factor. A record without GST
/// contributes nothing.
pub fn apportion_itc_claim(record: &InwardSupplyRecord) -> TaxAmounts {
    let paid = record.tax_amounts();
    let base = paid.gst_total();
    if base.is_zero() {
        return TaxAmounts::ZERO;
    }
    paid.map(|_, amount| amount * record.itc_claimed / base)
}

/// Split a total ITC reversal evenly between CGST and SGST.
pub fn split_itc_reversal(reversed: Decimal) -> TaxAmounts {
    let half = reversed / Decimal::TWO;
    TaxAmounts::new(half, half, Decimal::ZERO, Decimal::ZERO)
}

/// Outcome of comparing claimed against available ITC for one head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItcStatus {
    /// Claimed more than available.
    ExcessClaim,
    /// Claimed less than 90 % of available.
    UnderClaim,
    Compliant,
}

/// Audit risk of an ITC claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Classify a claim against the ITC available for the same head.
pub fn classify_itc(available: Decimal, claimed: Decimal) -> (ItcStatus, RiskLevel) {
    let status = if claimed > available {
        ItcStatus::ExcessClaim
    } else if claimed < available * UNDER_CLAIM_RATIO {
        ItcStatus::UnderClaim
    } else {
        ItcStatus::Compliant
    };

    let risk = if claimed > available * HIGH_RISK_RATIO {
        RiskLevel::High
    } else if claimed > available {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    (status, risk)
}

/// Round a money amount to paise, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
