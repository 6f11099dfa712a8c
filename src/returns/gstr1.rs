//! GSTR-1 preview: category and HSN rollups over uploaded invoices.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{InvoiceCategory, InvoiceRecord, StatusCounts, lookup_hsn};

/// HSN bucket used for records without a code.
pub const HSN_NOT_SPECIFIED: &str = "Not specified";

/// Totals for one GSTR-1 category (or the grand total).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CategorySummary {
    pub count: usize,
    pub taxable_value: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    /// Sum of invoice values.
    pub total_value: Decimal,
}

impl CategorySummary {
    fn add_record(&mut self, record: &InvoiceRecord) {
        self.count += 1;
        self.taxable_value += record.taxable_value;
        self.cgst += record.cgst_amount;
        self.sgst += record.sgst_amount;
        self.igst += record.igst_amount;
        self.total_value += record.invoice_value;
    }

    fn add_summary(&mut self, other: &CategorySummary) {
        self.count += other.count;
        self.taxable_value += other.taxable_value;
        self.cgst += other.cgst;
        self.sgst += other.sgst;
        self.igst += other.igst;
        self.total_value += other.total_value;
    }

    /// CGST + SGST + IGST.
    pub fn total_tax(&self) -> Decimal {
        self.cgst + self.sgst + self.igst
    }
}

/// Per-category rollup with grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRollup {
    /// One entry per category, in [`InvoiceCategory::ALL`] order.
    categories: [CategorySummary; 4],
    /// Sum across all categories.
    pub total: CategorySummary,
}

impl CategoryRollup {
    /// Group records by effective category (unset counts as B2B).
    pub fn compute(records: &[InvoiceRecord]) -> Self {
        let mut categories: [CategorySummary; 4] = Default::default();
        for record in records {
            categories[record.effective_category().index()].add_record(record);
        }

        let mut total = CategorySummary::default();
        for summary in &categories {
            total.add_summary(summary);
        }

        Self { categories, total }
    }

    pub fn get(&self, category: InvoiceCategory) -> &CategorySummary {
        &self.categories[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (InvoiceCategory, &CategorySummary)> {
        InvoiceCategory::ALL.into_iter().zip(self.categories.iter())
    }
}

/// Totals for one HSN code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HsnSummary {
    pub hsn_code: String,
    /// Description of the first record seen with this code.
    pub description: String,
    pub quantity: Decimal,
    pub taxable_value: Decimal,
    /// CGST + SGST + IGST.
    pub tax_amount: Decimal,
    /// Rate from the HSN reference table, when the code is known.
    pub reference_rate: Option<Decimal>,
}

/// Group records by HSN code, in order of first occurrence.
///
/// Later records with a different description for the same code do not
/// change the summary's description.
pub fn hsn_rollup(records: &[InvoiceRecord]) -> Vec<HsnSummary> {
    let mut summaries: Vec<HsnSummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let code = record.hsn_code.trim();
        let key = if code.is_empty() { HSN_NOT_SPECIFIED } else { code };

        let i = *index.entry(key.to_string()).or_insert_with(|| {
            summaries.push(HsnSummary {
                hsn_code: key.to_string(),
                description: record.description.clone(),
                quantity: Decimal::ZERO,
                taxable_value: Decimal::ZERO,
                tax_amount: Decimal::ZERO,
                reference_rate: lookup_hsn(code).map(|e| e.rate()),
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[i];
        summary.quantity += record.quantity;
        summary.taxable_value += record.taxable_value;
        summary.tax_amount += record.total_tax();
    }

    summaries
}

/// Everything the GSTR-1 preview step shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gstr1Summary {
    pub categories: CategoryRollup,
    pub hsn: Vec<HsnSummary>,
    pub counts: StatusCounts,
}

impl Gstr1Summary {
    pub fn compute(records: &[InvoiceRecord]) -> Self {
        Self {
            categories: CategoryRollup::compute(records),
            hsn: hsn_rollup(records),
            counts: StatusCounts::from_records(records),
        }
    }
}
