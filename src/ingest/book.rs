use chrono::Utc;
use tracing::info;

use super::parser::{ParseOptions, parse_invoices_from};
use crate::core::{GstError, InvoiceRecord, StatusCounts, validate_invoices};

/// In-memory invoice collection behind the GSTR-1 upload step.
///
/// Each upload is parsed independently and appended; validation replaces
/// the records with validated copies. Clearing discards everything.
///
/// Row numbers in record ids keep counting across uploads (and clears), so
/// ids stay unique within a book.
#[derive(Debug, Clone, Default)]
pub struct InvoiceBook {
    options: ParseOptions,
    records: Vec<InvoiceRecord>,
    next_row: usize,
}

impl InvoiceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Parse an uploaded file and append its records as pending.
    ///
    /// Returns the number of records added. On a parse error nothing is
    /// appended.
    pub fn ingest(&mut self, text: &str) -> Result<usize, GstError> {
        let parsed = parse_invoices_from(text, &self.options, Utc::now(), self.next_row)?;
        let added = parsed.len();
        self.next_row += added;
        self.records.extend(parsed);
        info!(added, total = self.records.len(), "invoice upload ingested");
        Ok(added)
    }

    /// Append records built elsewhere (manual entry).
    pub fn extend(&mut self, records: impl IntoIterator<Item = InvoiceRecord>) {
        self.records.extend(records);
    }

    /// Validate every record, replacing the collection with the results.
    pub fn validate(&mut self) -> StatusCounts {
        self.records = validate_invoices(&self.records);
        self.counts()
    }

    /// Discard all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[InvoiceRecord] {
        &self.records
    }

    /// Records that failed validation.
    pub fn rejected(&self) -> impl Iterator<Item = &InvoiceRecord> {
        self.records.iter().filter(|r| !r.errors.is_empty())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::from_records(&self.records)
    }

    /// True when there is at least one record and all are validated.
    pub fn is_ready(&self) -> bool {
        !self.records.is_empty() && self.records.iter().all(InvoiceRecord::is_validated)
    }

    /// GSTR-1 preview summary of the current records.
    #[cfg(feature = "returns")]
    pub fn summary(&self) -> crate::returns::Gstr1Summary {
        crate::returns::Gstr1Summary::compute(&self.records)
    }
}
