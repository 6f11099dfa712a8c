//! Scenario-driven mock data for demos and tests.
//!
//! [`MockApi`] is an explicit context: build one per run (or per test) for
//! the scenario you want. It holds no shared state.
//!
//! ```rust
//! use gst_filing::mock::{MockApi, Scenario};
//! use gst_filing::returns::RiskLevel;
//!
//! let api = MockApi::new(Scenario::ItcMismatch);
//! assert_eq!(api.gstr9_summary().itc_analysis.overall_risk(), RiskLevel::High);
//!
//! let api = api.with_scenario(Scenario::Compliant);
//! assert!(api.gstr9_summary().itc_analysis.is_compliant());
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::{
    InvoiceCategory, InvoiceRecord, InvoiceRecordBuilder, InwardSupplyRecord,
    OutwardSupplyRecord, SupplyType, TaxAmounts,
};
use crate::returns::{Gstr3bSummary, Gstr9Summary};

/// Which data set a [`MockApi`] serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// ITC claimed matches GSTR-2B; moderate liability.
    #[default]
    Compliant,
    /// Large outward tax with little ITC to set off.
    HighLiability,
    /// ITC claimed exceeds what GSTR-2B shows.
    ItcMismatch,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Self::Compliant, Self::HighLiability, Self::ItcMismatch];
}

/// Filing status of a return in the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnStatus {
    Filed,
    Pending,
    Overdue,
}

/// One row of the filing calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    /// Return name, e.g. `GSTR-3B`.
    pub return_name: String,
    /// Tax period, e.g. `March 2024`.
    pub period: String,
    pub due_date: NaiveDate,
    pub status: ReturnStatus,
}

/// Mock data context for one scenario.
#[derive(Debug, Clone)]
pub struct MockApi {
    scenario: Scenario,
    outward: Vec<OutwardSupplyRecord>,
    inward: Vec<InwardSupplyRecord>,
    available_2b: TaxAmounts,
}

impl MockApi {
    pub fn new(scenario: Scenario) -> Self {
        let (outward, inward, available_2b) = match scenario {
            Scenario::Compliant => (
                standard_outward(),
                vec![
                    inward(dec!(300000), dec!(27000), dec!(27000), dec!(0), dec!(54000), dec!(0)),
                    inward(dec!(100000), dec!(0), dec!(0), dec!(18000), dec!(18000), dec!(0)),
                    inward(dec!(25000), dec!(0), dec!(0), dec!(0), dec!(0), dec!(0)),
                ],
                tax(dec!(27000), dec!(27000), dec!(18000)),
            ),
            Scenario::HighLiability => (
                vec![
                    outward(SupplyType::B2B, dec!(2500000), dec!(225000), dec!(225000), dec!(0)),
                    outward(SupplyType::B2C, dec!(800000), dec!(0), dec!(0), dec!(144000)),
                    outward(SupplyType::Export, dec!(100000), dec!(0), dec!(0), dec!(0)),
                ],
                vec![inward(dec!(200000), dec!(18000), dec!(18000), dec!(0), dec!(36000), dec!(2000))],
                tax(dec!(18000), dec!(18000), dec!(0)),
            ),
            Scenario::ItcMismatch => (
                standard_outward(),
                vec![
                    inward(dec!(300000), dec!(27000), dec!(27000), dec!(0), dec!(54000), dec!(4000)),
                    inward(dec!(100000), dec!(0), dec!(0), dec!(18000), dec!(18000), dec!(0)),
                ],
                tax(dec!(20000), dec!(25000), dec!(18000)),
            ),
        };

        Self {
            scenario,
            outward,
            inward,
            available_2b,
        }
    }

    /// Same context type, different data set.
    pub fn with_scenario(self, scenario: Scenario) -> Self {
        Self::new(scenario)
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn outward_supplies(&self) -> &[OutwardSupplyRecord] {
        &self.outward
    }

    pub fn inward_supplies(&self) -> &[InwardSupplyRecord] {
        &self.inward
    }

    /// ITC available per GSTR-2B, per head.
    pub fn gstr2b_available(&self) -> TaxAmounts {
        self.available_2b
    }

    /// Sample GSTR-1 invoices (pending, not yet validated).
    pub fn invoices(&self) -> Vec<InvoiceRecord> {
        vec![
            InvoiceRecordBuilder::new("INV-2024-101", "2024-03-04", "Sharma Electronics")
                .gstin("27AAPFU0939F1ZV")
                .place_of_supply("Maharashtra")
                .amounts(dec!(50000), dec!(4500), dec!(4500), dec!(0))
                .rates(dec!(9), dec!(9), dec!(0))
                .hsn("8471", "Laptop")
                .quantity(dec!(1), dec!(50000))
                .category(InvoiceCategory::B2B)
                .build(),
            InvoiceRecordBuilder::new("INV-2024-102", "2024-03-11", "Walk-in customer")
                .place_of_supply("Gujarat")
                .amounts(dec!(20000), dec!(0), dec!(0), dec!(3600))
                .rates(dec!(0), dec!(0), dec!(18))
                .hsn("8517", "Mobile phone")
                .quantity(dec!(2), dec!(10000))
                .category(InvoiceCategory::B2C)
                .build(),
            InvoiceRecordBuilder::new("INV-2024-103", "2024-03-19", "Globex Corp, USA")
                .amounts(dec!(150000), dec!(0), dec!(0), dec!(0))
                .hsn("998314", "Software development")
                .category(InvoiceCategory::Export)
                .build(),
            InvoiceRecordBuilder::new("INV-2024-104", "2024-03-27", "Patel Dairy")
                .gstin("24AAACP1234A1Z2")
                .place_of_supply("Gujarat")
                .amounts(dec!(8000), dec!(0), dec!(0), dec!(0))
                .hsn("0401", "Milk")
                .quantity(dec!(200), dec!(40))
                .category(InvoiceCategory::NilRated)
                .build(),
        ]
    }

    /// Filing calendar for the current period.
    pub fn filing_calendar(&self) -> Vec<CalendarEntry> {
        let (gstr1, gstr3b, gstr9) = match self.scenario {
            Scenario::Compliant => (ReturnStatus::Filed, ReturnStatus::Filed, ReturnStatus::Pending),
            Scenario::HighLiability => {
                (ReturnStatus::Filed, ReturnStatus::Pending, ReturnStatus::Pending)
            }
            Scenario::ItcMismatch => {
                (ReturnStatus::Filed, ReturnStatus::Overdue, ReturnStatus::Pending)
            }
        };

        [
            ("GSTR-1", "March 2024", (2024, 4, 11), gstr1),
            ("GSTR-3B", "March 2024", (2024, 4, 20), gstr3b),
            ("GSTR-9", "FY 2023-24", (2024, 12, 31), gstr9),
        ]
        .into_iter()
        .filter_map(|(name, period, (y, m, d), status)| {
            Some(CalendarEntry {
                return_name: name.to_string(),
                period: period.to_string(),
                due_date: NaiveDate::from_ymd_opt(y, m, d)?,
                status,
            })
        })
        .collect()
    }

    pub fn gstr3b_summary(&self) -> Gstr3bSummary {
        Gstr3bSummary::compute(&self.outward, &self.inward)
    }

    pub fn gstr9_summary(&self) -> Gstr9Summary {
        Gstr9Summary::compute(&self.outward, &self.inward, &self.available_2b)
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new(Scenario::default())
    }
}

fn tax(cgst: Decimal, sgst: Decimal, igst: Decimal) -> TaxAmounts {
    TaxAmounts::new(cgst, sgst, igst, Decimal::ZERO)
}

fn outward(
    supply_type: SupplyType,
    taxable: Decimal,
    cgst: Decimal,
    sgst: Decimal,
    igst: Decimal,
) -> OutwardSupplyRecord {
    OutwardSupplyRecord::new(supply_type, taxable, tax(cgst, sgst, igst))
}

fn inward(
    taxable: Decimal,
    cgst: Decimal,
    sgst: Decimal,
    igst: Decimal,
    claimed: Decimal,
    reversed: Decimal,
) -> InwardSupplyRecord {
    InwardSupplyRecord::new(taxable, tax(cgst, sgst, igst), claimed, reversed)
}

fn standard_outward() -> Vec<OutwardSupplyRecord> {
    vec![
        outward(SupplyType::B2B, dec!(500000), dec!(45000), dec!(45000), dec!(0)),
        outward(SupplyType::B2C, dec!(200000), dec!(0), dec!(0), dec!(36000)),
        outward(SupplyType::Export, dec!(150000), dec!(0), dec!(0), dec!(0)),
        outward(SupplyType::Exempt, dec!(30000), dec!(0), dec!(0), dec!(0)),
        outward(SupplyType::NilRated, dec!(20000), dec!(0), dec!(0), dec!(0)),
    ]
}
