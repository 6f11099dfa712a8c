//! HSN / SAC reference table.
//!
//! A small static subset of the Harmonized System of Nomenclature (goods)
//! and Services Accounting Codes (services) with the GST rate usually
//! applied. Used to annotate HSN summaries; the rate of an individual
//! invoice line is always taken from the upload itself.

use rust_decimal::Decimal;
use serde::Serialize;

/// Whether a code classifies goods (HSN) or services (SAC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SupplyKind {
    Goods,
    Services,
}

/// One row of the HSN reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HsnEntry {
    pub code: &'static str,
    pub description: &'static str,
    pub kind: SupplyKind,
    /// GST rate in basis points (1800 = 18 %).
    rate_bp: u32,
}

impl HsnEntry {
    const fn goods(code: &'static str, description: &'static str, rate_bp: u32) -> Self {
        Self {
            code,
            description,
            kind: SupplyKind::Goods,
            rate_bp,
        }
    }

    const fn services(code: &'static str, description: &'static str, rate_bp: u32) -> Self {
        Self {
            code,
            description,
            kind: SupplyKind::Services,
            rate_bp,
        }
    }

    /// Combined GST rate in percent (CGST + SGST, or IGST).
    pub fn rate(&self) -> Decimal {
        Decimal::new(self.rate_bp as i64, 2)
    }
}

static HSN_TABLE: &[HsnEntry] = &[
    HsnEntry::goods("0401", "Milk and cream, not concentrated", 0),
    HsnEntry::goods("0713", "Dried leguminous vegetables, shelled", 0),
    HsnEntry::goods("1006", "Rice", 500),
    HsnEntry::goods("1701", "Cane or beet sugar", 500),
    HsnEntry::goods("3004", "Medicaments, packed for retail sale", 1200),
    HsnEntry::goods("3304", "Beauty or make-up preparations", 1800),
    HsnEntry::goods("4820", "Registers, notebooks and similar stationery", 1200),
    HsnEntry::goods("6109", "T-shirts, singlets and vests, knitted", 500),
    HsnEntry::goods("7108", "Gold, unwrought or semi-manufactured", 300),
    HsnEntry::goods("7113", "Articles of jewellery", 300),
    HsnEntry::goods("8415", "Air conditioning machines", 2800),
    HsnEntry::goods("8471", "Automatic data processing machines", 1800),
    HsnEntry::goods("8517", "Telephone sets, including smartphones", 1800),
    HsnEntry::goods("8703", "Motor cars and other motor vehicles", 2800),
    HsnEntry::goods("9403", "Other furniture and parts thereof", 1800),
    HsnEntry::services("9954", "Construction services", 1800),
    HsnEntry::services("9963", "Accommodation, food and beverage services", 500),
    HsnEntry::services("9971", "Financial and related services", 1800),
    HsnEntry::services("9983", "Other professional, technical and business services", 1800),
    HsnEntry::services("998314", "IT design and development services", 1800),
    HsnEntry::services("9985", "Support services", 1800),
    HsnEntry::services("9997", "Other services", 1800),
];

/// All reference entries.
pub fn hsn_table() -> &'static [HsnEntry] {
    HSN_TABLE
}

/// Look up a code, falling back to its 8-, 6-, 4- and 2-digit prefixes.
///
/// Returns `None` for blank or non-numeric codes and codes whose heading
/// is not in the table.
pub fn lookup_hsn(code: &str) -> Option<&'static HsnEntry> {
    let code = code.trim();
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    [code.len(), 8, 6, 4, 2]
        .into_iter()
        .filter(|len| *len <= code.len())
        .find_map(|len| HSN_TABLE.iter().find(|e| e.code == &code[..len]))
}
