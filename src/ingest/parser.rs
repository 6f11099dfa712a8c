//! Positional CSV parser for the invoice upload template.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GstError, InvoiceRecord, MAX_AMOUNT, RecordStatus};

/// Options for reading an uploaded invoice file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Field delimiter (default `,`).
    pub delimiter: u8,
    /// Honour double-quoted fields (default `true`).
    pub quoting: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quoting: true,
        }
    }
}

/// Column positions of the upload layout.
mod col {
    pub const INVOICE_NUMBER: usize = 0;
    pub const INVOICE_DATE: usize = 1;
    pub const CUSTOMER_NAME: usize = 2;
    pub const CUSTOMER_GSTIN: usize = 3;
    pub const PLACE_OF_SUPPLY: usize = 4;
    pub const INVOICE_VALUE: usize = 5;
    pub const TAXABLE_VALUE: usize = 6;
    pub const CGST_RATE: usize = 7;
    pub const CGST_AMOUNT: usize = 8;
    pub const SGST_RATE: usize = 9;
    pub const SGST_AMOUNT: usize = 10;
    pub const IGST_RATE: usize = 11;
    pub const IGST_AMOUNT: usize = 12;
    pub const HSN_CODE: usize = 13;
    pub const DESCRIPTION: usize = 14;
    pub const QUANTITY: usize = 15;
    pub const RATE: usize = 16;
}

/// Parse an uploaded invoice file with default options.
///
/// See [`parse_invoices_with`].
pub fn parse_invoices(text: &str) -> Result<Vec<InvoiceRecord>, GstError> {
    parse_invoices_with(text, &ParseOptions::default(), Utc::now())
}

/// Parse raw bytes, rejecting input that is not UTF-8.
pub fn parse_invoice_bytes(
    bytes: &[u8],
    options: &ParseOptions,
) -> Result<Vec<InvoiceRecord>, GstError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| GstError::Parse(format!("file is not valid UTF-8: {e}")))?;
    parse_invoices_with(text, options, Utc::now())
}

/// Parse an uploaded invoice file.
///
/// Blank lines are ignored. The first remaining line is the header and only
/// its field count is used. Each following row becomes one pending
/// [`InvoiceRecord`]; rows with fewer fields than the header are skipped
/// without an error. A row of empty fields is still a row. Numbers that do
/// not parse, or whose magnitude exceeds [`MAX_AMOUNT`], become 0 (quantity
/// becomes 1).
///
/// Record ids are `{ingested_at millis}-{row index}`.
///
/// # Errors
///
/// Returns [`GstError::Parse`] for the whole file when it has no header row,
/// a quoted field is never closed, or the delimited structure is otherwise
/// broken.
pub fn parse_invoices_with(
    text: &str,
    options: &ParseOptions,
    ingested_at: DateTime<Utc>,
) -> Result<Vec<InvoiceRecord>, GstError> {
    parse_invoices_from(text, options, ingested_at, 0)
}

/// Like [`parse_invoices_with`], numbering data rows from `first_row` so ids
/// stay unique across uploads stamped in the same millisecond.
pub fn parse_invoices_from(
    text: &str,
    options: &ParseOptions,
    ingested_at: DateTime<Utc>,
    first_row: usize,
) -> Result<Vec<InvoiceRecord>, GstError> {
    if options.quoting {
        if let Some(line) = unterminated_quote(text, options.delimiter) {
            return Err(GstError::Parse(format!(
                "unterminated quoted field starting on line {line}"
            )));
        }
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .quoting(options.quoting)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = reader
        .records()
        .filter(|r| !matches!(r, Ok(rec) if rec.len() == 1 && rec[0].is_empty()));

    let header = rows
        .next()
        .ok_or_else(|| GstError::Parse("file contains no header row".into()))?
        .map_err(|e| GstError::Parse(e.to_string()))?;
    let columns = header.len();

    let stamp = ingested_at.timestamp_millis();
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in rows.enumerate() {
        let row = row.map_err(|e| GstError::Parse(e.to_string()))?;
        if row.len() < columns {
            skipped += 1;
            debug!(row = index + 1, fields = row.len(), columns, "skipping short row");
            continue;
        }
        records.push(record_from_row(&row, format!("{stamp}-{}", first_row + index)));
    }

    debug!(
        columns,
        parsed = records.len(),
        skipped,
        "invoice file parsed"
    );

    Ok(records)
}

/// Line on which a quoted field opens without ever closing.
///
/// A quote only opens a field when it is the field's first byte; inside a
/// quoted field `""` is an escaped quote.
fn unterminated_quote(text: &str, delimiter: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut line = 1;
    let mut opened_on = None;
    let mut field_start = true;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if opened_on.is_some() {
            match b {
                b'"' if bytes.get(i + 1) == Some(&b'"') => i += 1,
                b'"' => opened_on = None,
                b'\n' => line += 1,
                _ => {}
            }
        } else if b == b'\n' {
            line += 1;
            field_start = true;
            i += 1;
            continue;
        } else if b == delimiter || b == b'\r' {
            field_start = true;
            i += 1;
            continue;
        } else if b == b'"' && field_start {
            opened_on = Some(line);
        }
        field_start = false;
        i += 1;
    }

    opened_on
}

fn record_from_row(row: &csv::StringRecord, id: String) -> InvoiceRecord {
    let text = |i: usize| row.get(i).unwrap_or("").to_string();
    let number = |i: usize, default: Decimal| {
        let raw = row.get(i).unwrap_or("");
        match Decimal::from_str(raw) {
            Ok(value) if value.abs() <= MAX_AMOUNT => value,
            Ok(_) => {
                debug!(column = i, value = raw, "amount out of range, using default");
                default
            }
            Err(_) => default,
        }
    };

    InvoiceRecord {
        id,
        invoice_number: text(col::INVOICE_NUMBER),
        invoice_date: text(col::INVOICE_DATE),
        customer_name: text(col::CUSTOMER_NAME),
        customer_gstin: text(col::CUSTOMER_GSTIN),
        place_of_supply: text(col::PLACE_OF_SUPPLY),
        invoice_value: number(col::INVOICE_VALUE, Decimal::ZERO),
        taxable_value: number(col::TAXABLE_VALUE, Decimal::ZERO),
        cgst_rate: number(col::CGST_RATE, Decimal::ZERO),
        cgst_amount: number(col::CGST_AMOUNT, Decimal::ZERO),
        sgst_rate: number(col::SGST_RATE, Decimal::ZERO),
        sgst_amount: number(col::SGST_AMOUNT, Decimal::ZERO),
        igst_rate: number(col::IGST_RATE, Decimal::ZERO),
        igst_amount: number(col::IGST_AMOUNT, Decimal::ZERO),
        hsn_code: text(col::HSN_CODE),
        description: text(col::DESCRIPTION),
        quantity: number(col::QUANTITY, Decimal::ONE),
        rate: number(col::RATE, Decimal::ZERO),
        category: None,
        errors: Vec::new(),
        status: RecordStatus::Pending,
    }
}
