use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// A single outward-supply line item as uploaded for GSTR-1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Synthesized identifier, unique within one ingestion.
    pub id: String,
    /// Invoice number as printed on the document.
    pub invoice_number: String,
    /// Invoice date as uploaded (not normalized).
    pub invoice_date: String,
    /// Recipient name.
    pub customer_name: String,
    /// Recipient GSTIN; empty for unregistered recipients.
    pub customer_gstin: String,
    /// Place of supply (state name or state code).
    pub place_of_supply: String,
    /// Total invoice value including tax.
    pub invoice_value: Decimal,
    /// Taxable value before tax.
    pub taxable_value: Decimal,
    pub cgst_rate: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_rate: Decimal,
    pub sgst_amount: Decimal,
    pub igst_rate: Decimal,
    pub igst_amount: Decimal,
    /// HSN (goods) or SAC (services) code.
    pub hsn_code: String,
    pub description: String,
    /// Quantity supplied (1 when not given).
    pub quantity: Decimal,
    /// Unit rate.
    pub rate: Decimal,
    /// Supply category; `None` is treated as B2B by every rollup.
    pub category: Option<InvoiceCategory>,
    /// Validation errors; empty unless `status` is `Error`.
    pub errors: Vec<ValidationError>,
    pub status: RecordStatus,
}

impl InvoiceRecord {
    /// Category used for aggregation (unset falls back to B2B).
    pub fn effective_category(&self) -> InvoiceCategory {
        InvoiceCategory::effective(self.category)
    }

    /// Per-head tax amounts of this record (invoices carry no cess).
    pub fn tax_amounts(&self) -> TaxAmounts {
        TaxAmounts::new(
            self.cgst_amount,
            self.sgst_amount,
            self.igst_amount,
            Decimal::ZERO,
        )
    }

    /// CGST + SGST + IGST, saturating at the [`Decimal`] bounds.
    pub fn total_tax(&self) -> Decimal {
        self.cgst_amount
            .saturating_add(self.sgst_amount)
            .saturating_add(self.igst_amount)
    }

    /// CGST + SGST + IGST, or `None` on overflow.
    pub fn checked_total_tax(&self) -> Option<Decimal> {
        self.cgst_amount
            .checked_add(self.sgst_amount)?
            .checked_add(self.igst_amount)
    }

    pub fn is_validated(&self) -> bool {
        self.status == RecordStatus::Validated
    }

    /// Return a copy with the given category assigned.
    pub fn with_category(mut self, category: InvoiceCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// Number of records per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub validated: usize,
    pub error: usize,
}

impl StatusCounts {
    pub fn from_records(records: &[InvoiceRecord]) -> Self {
        records.iter().fold(Self::default(), |mut counts, r| {
            match r.status {
                RecordStatus::Pending => counts.pending += 1,
                RecordStatus::Validated => counts.validated += 1,
                RecordStatus::Error => counts.error += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.pending + self.validated + self.error
    }
}

/// GSTR-1 supply category of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InvoiceCategory {
    /// Supplies to registered persons.
    B2B,
    /// Supplies to unregistered persons.
    B2C,
    /// Exports (zero-rated).
    Export,
    /// Nil-rated supplies.
    NilRated,
}

impl InvoiceCategory {
    pub const ALL: [InvoiceCategory; 4] = [Self::B2B, Self::B2C, Self::Export, Self::NilRated];

    /// Display label as shown in the GSTR-1 preview.
    pub fn label(&self) -> &'static str {
        match self {
            Self::B2B => "B2B",
            Self::B2C => "B2C",
            Self::Export => "Export",
            Self::NilRated => "Nil Rated",
        }
    }

    /// Parse a category label leniently (case-insensitive, ignores
    /// spaces, hyphens and underscores). Unknown labels return `None`.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "b2b" => Some(Self::B2B),
            "b2c" | "b2cs" | "b2cl" => Some(Self::B2C),
            "export" | "exports" | "exp" => Some(Self::Export),
            "nil" | "nilrated" => Some(Self::NilRated),
            _ => None,
        }
    }

    /// Total mapping from an optional category: unset means B2B.
    pub fn effective(category: Option<Self>) -> Self {
        category.unwrap_or(Self::B2B)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::B2B => 0,
            Self::B2C => 1,
            Self::Export => 2,
            Self::NilRated => 3,
        }
    }
}

/// Lifecycle status of an uploaded invoice record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Parsed but not yet validated.
    #[default]
    Pending,
    /// Passed every validation rule.
    Validated,
    /// At least one validation rule failed.
    Error,
}

/// GST tax heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxHead {
    /// Central GST.
    Cgst,
    /// State / Union Territory GST.
    Sgst,
    /// Integrated GST (inter-state supplies).
    Igst,
    /// Compensation cess.
    Cess,
}

impl TaxHead {
    pub const ALL: [TaxHead; 4] = [Self::Cgst, Self::Sgst, Self::Igst, Self::Cess];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cgst => "CGST",
            Self::Sgst => "SGST",
            Self::Igst => "IGST",
            Self::Cess => "Cess",
        }
    }
}

/// Amounts per tax head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxAmounts {
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub cess: Decimal,
}

impl TaxAmounts {
    pub const ZERO: TaxAmounts = TaxAmounts {
        cgst: Decimal::ZERO,
        sgst: Decimal::ZERO,
        igst: Decimal::ZERO,
        cess: Decimal::ZERO,
    };

    pub fn new(cgst: Decimal, sgst: Decimal, igst: Decimal, cess: Decimal) -> Self {
        Self {
            cgst,
            sgst,
            igst,
            cess,
        }
    }

    /// Build from a per-head function.
    pub fn from_fn(mut f: impl FnMut(TaxHead) -> Decimal) -> Self {
        Self {
            cgst: f(TaxHead::Cgst),
            sgst: f(TaxHead::Sgst),
            igst: f(TaxHead::Igst),
            cess: f(TaxHead::Cess),
        }
    }

    pub fn get(&self, head: TaxHead) -> Decimal {
        match head {
            TaxHead::Cgst => self.cgst,
            TaxHead::Sgst => self.sgst,
            TaxHead::Igst => self.igst,
            TaxHead::Cess => self.cess,
        }
    }

    /// Apply `f` to every head.
    pub fn map(&self, mut f: impl FnMut(TaxHead, Decimal) -> Decimal) -> Self {
        Self::from_fn(|head| f(head, self.get(head)))
    }

    /// CGST + SGST + IGST (cess excluded).
    pub fn gst_total(&self) -> Decimal {
        self.cgst + self.sgst + self.igst
    }

    /// Sum over all four heads.
    pub fn total(&self) -> Decimal {
        self.gst_total() + self.cess
    }

    pub fn is_zero(&self) -> bool {
        TaxHead::ALL.iter().all(|h| self.get(*h).is_zero())
    }
}

impl Add for TaxAmounts {
    type Output = TaxAmounts;

    fn add(self, rhs: TaxAmounts) -> TaxAmounts {
        self.map(|head, v| v + rhs.get(head))
    }
}

impl AddAssign for TaxAmounts {
    fn add_assign(&mut self, rhs: TaxAmounts) {
        *self = *self + rhs;
    }
}

impl Sum for TaxAmounts {
    fn sum<I: Iterator<Item = TaxAmounts>>(iter: I) -> Self {
        iter.fold(TaxAmounts::ZERO, Add::add)
    }
}

/// A purchase-side record feeding the ITC tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InwardSupplyRecord {
    pub taxable_value: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
    #[serde(default)]
    pub cess_amount: Decimal,
    /// Total input tax credit claimed on this purchase.
    pub itc_claimed: Decimal,
    /// Total input tax credit reversed on this purchase.
    pub itc_reversed: Decimal,
}

impl InwardSupplyRecord {
    pub fn new(
        taxable_value: Decimal,
        taxes: TaxAmounts,
        itc_claimed: Decimal,
        itc_reversed: Decimal,
    ) -> Self {
        Self {
            taxable_value,
            cgst_amount: taxes.cgst,
            sgst_amount: taxes.sgst,
            igst_amount: taxes.igst,
            cess_amount: taxes.cess,
            itc_claimed,
            itc_reversed,
        }
    }

    pub fn tax_amounts(&self) -> TaxAmounts {
        TaxAmounts::new(
            self.cgst_amount,
            self.sgst_amount,
            self.igst_amount,
            self.cess_amount,
        )
    }
}

/// Type of an outward supply as reported in GSTR-3B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplyType {
    B2B,
    B2C,
    Export,
    Exempt,
    NilRated,
}

impl SupplyType {
    /// GSTR-3B table 3.1 row this supply type reports under.
    pub fn bucket(&self) -> OutwardBucket {
        match self {
            Self::B2B | Self::B2C => OutwardBucket::Taxable,
            Self::Export => OutwardBucket::ZeroRated,
            Self::Exempt | Self::NilRated => OutwardBucket::NilExempt,
        }
    }

    /// Whether tax on this supply enters the table 3.1 head sums: every type
    /// except exports and exempt supplies.
    pub fn counts_toward_outward_tax(&self) -> bool {
        !matches!(self, Self::Export | Self::Exempt)
    }
}

impl From<InvoiceCategory> for SupplyType {
    fn from(category: InvoiceCategory) -> Self {
        match category {
            InvoiceCategory::B2B => Self::B2B,
            InvoiceCategory::B2C => Self::B2C,
            InvoiceCategory::Export => Self::Export,
            InvoiceCategory::NilRated => Self::NilRated,
        }
    }
}

/// GSTR-3B table 3.1 rows for outward supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutwardBucket {
    /// 3.1(a): outward taxable supplies other than zero rated, nil rated and exempted.
    Taxable,
    /// 3.1(b): outward taxable supplies, zero rated.
    ZeroRated,
    /// 3.1(c): other outward supplies, nil rated and exempted.
    NilExempt,
}

/// A sales-side record feeding GSTR-3B and GSTR-9.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutwardSupplyRecord {
    pub supply_type: SupplyType,
    pub taxable_value: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
    #[serde(default)]
    pub cess_amount: Decimal,
}

impl OutwardSupplyRecord {
    pub fn new(supply_type: SupplyType, taxable_value: Decimal, taxes: TaxAmounts) -> Self {
        Self {
            supply_type,
            taxable_value,
            cgst_amount: taxes.cgst,
            sgst_amount: taxes.sgst,
            igst_amount: taxes.igst,
            cess_amount: taxes.cess,
        }
    }

    pub fn tax_amounts(&self) -> TaxAmounts {
        TaxAmounts::new(
            self.cgst_amount,
            self.sgst_amount,
            self.igst_amount,
            self.cess_amount,
        )
    }
}

impl From<&InvoiceRecord> for OutwardSupplyRecord {
    fn from(record: &InvoiceRecord) -> Self {
        Self::new(
            record.effective_category().into(),
            record.taxable_value,
            record.tax_amounts(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unset_category_is_b2b() {
        assert_eq!(InvoiceCategory::effective(None), InvoiceCategory::B2B);
        assert_eq!(
            InvoiceCategory::effective(Some(InvoiceCategory::Export)),
            InvoiceCategory::Export
        );
    }

    #[test]
    fn category_parse_is_lenient() {
        assert_eq!(InvoiceCategory::parse("b2b"), Some(InvoiceCategory::B2B));
        assert_eq!(InvoiceCategory::parse(" B2C "), Some(InvoiceCategory::B2C));
        assert_eq!(
            InvoiceCategory::parse("Nil-Rated"),
            Some(InvoiceCategory::NilRated)
        );
        assert_eq!(InvoiceCategory::parse("EXPORT"), Some(InvoiceCategory::Export));
        assert_eq!(InvoiceCategory::parse(""), None);
        assert_eq!(InvoiceCategory::parse("wholesale"), None);
    }

    #[test]
    fn supply_type_buckets() {
        assert_eq!(SupplyType::B2B.bucket(), OutwardBucket::Taxable);
        assert_eq!(SupplyType::B2C.bucket(), OutwardBucket::Taxable);
        assert_eq!(SupplyType::Export.bucket(), OutwardBucket::ZeroRated);
        assert_eq!(SupplyType::Exempt.bucket(), OutwardBucket::NilExempt);
        assert_eq!(SupplyType::NilRated.bucket(), OutwardBucket::NilExempt);
    }

    #[test]
    fn tax_amounts_arithmetic() {
        let a = TaxAmounts::new(dec!(10), dec!(10), dec!(0), dec!(1));
        let b = TaxAmounts::new(dec!(5), dec!(5), dec!(20), dec!(0));
        let sum = a + b;
        assert_eq!(sum, TaxAmounts::new(dec!(15), dec!(15), dec!(20), dec!(1)));
        assert_eq!(sum.gst_total(), dec!(50));
        assert_eq!(sum.total(), dec!(51));

        let total: TaxAmounts = vec![a, b].into_iter().sum();
        assert_eq!(total, sum);
        assert!(TaxAmounts::ZERO.is_zero());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&RecordStatus::Validated).unwrap();
        assert_eq!(json, "\"validated\"");
    }
}
