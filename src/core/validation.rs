use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use super::error::{GstinFormatError, ValidationError};
use super::types::*;

/// Absolute slack allowed between the invoice value and taxable value plus
/// tax (one currency unit, for rounding).
pub const ARITHMETIC_TOLERANCE: Decimal = Decimal::ONE;

/// Largest magnitude accepted for any amount on an invoice (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Accepted invoice date formats.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Validate a batch of uploaded records.
///
/// Returns new records with `errors` and `status` populated; the input is
/// left untouched. Every rule is checked independently and all violations
/// are collected.
pub fn validate_invoices(records: &[InvoiceRecord]) -> Vec<InvoiceRecord> {
    let validated: Vec<InvoiceRecord> = records.iter().map(validate_record).collect();

    let failed = validated
        .iter()
        .filter(|r| r.status == RecordStatus::Error)
        .count();
    info!(
        total = validated.len(),
        validated = validated.len() - failed,
        failed,
        "invoice batch validated"
    );

    validated
}

/// Validate a single record, returning a new record with status set.
pub fn validate_record(record: &InvoiceRecord) -> InvoiceRecord {
    let errors = record_errors(record);
    let status = if errors.is_empty() {
        RecordStatus::Validated
    } else {
        RecordStatus::Error
    };

    InvoiceRecord {
        errors,
        status,
        ..record.clone()
    }
}

/// Collect all rule violations for a record.
pub fn record_errors(record: &InvoiceRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if record.invoice_number.trim().is_empty() {
        errors.push(ValidationError::new(
            "invoice_number",
            "invoice number is required",
        ));
    }

    if record.invoice_date.trim().is_empty() {
        errors.push(ValidationError::new(
            "invoice_date",
            "invoice date is required",
        ));
    } else if parse_invoice_date(&record.invoice_date).is_none() {
        errors.push(ValidationError::new(
            "invoice_date",
            format!(
                "invoice date '{}' is not a valid date (expected YYYY-MM-DD, DD-MM-YYYY or DD/MM/YYYY)",
                record.invoice_date.trim()
            ),
        ));
    }

    if record.customer_name.trim().is_empty() {
        errors.push(ValidationError::new(
            "customer_name",
            "customer name is required",
        ));
    }

    if record.hsn_code.trim().is_empty() {
        errors.push(ValidationError::new("hsn_code", "HSN code is required"));
    }

    if record.taxable_value <= Decimal::ZERO {
        errors.push(ValidationError::new(
            "taxable_value",
            "taxable value must be greater than zero",
        ));
    }

    let gstin = record.customer_gstin.trim();
    if !gstin.is_empty() {
        if let Err(e) = validate_gstin(gstin) {
            errors.push(ValidationError::new(
                "customer_gstin",
                format!("invalid GSTIN format: {}", e.reason),
            ));
        }
    }

    for (field, amount) in [
        ("cgst_amount", record.cgst_amount),
        ("sgst_amount", record.sgst_amount),
        ("igst_amount", record.igst_amount),
    ] {
        if amount < Decimal::ZERO {
            errors.push(ValidationError::new(field, "tax amount must not be negative"));
        }
    }

    for (field, amount) in [
        ("invoice_value", record.invoice_value),
        ("taxable_value", record.taxable_value),
        ("cgst_amount", record.cgst_amount),
        ("sgst_amount", record.sgst_amount),
        ("igst_amount", record.igst_amount),
    ] {
        if amount.abs() > MAX_AMOUNT {
            errors.push(ValidationError::new(
                field,
                format!("amount {amount} exceeds the supported maximum {MAX_AMOUNT}"),
            ));
        }
    }

    if let Some(e) = check_arithmetic(record) {
        errors.push(e);
    }

    errors
}

/// Check that taxable value plus tax matches the invoice value within
/// [`ARITHMETIC_TOLERANCE`].
///
/// Sums that do not fit in a [`Decimal`] are reported as a mismatch.
pub fn check_arithmetic(record: &InvoiceRecord) -> Option<ValidationError> {
    let Some(computed) = record
        .checked_total_tax()
        .and_then(|tax| record.taxable_value.checked_add(tax))
    else {
        return Some(ValidationError::new(
            "invoice_value",
            "taxable value + tax is too large to compute",
        ));
    };
    let Some(difference) = computed.checked_sub(record.invoice_value).map(|d| d.abs()) else {
        return Some(ValidationError::new(
            "invoice_value",
            format!(
                "invoice value {} is too far from taxable value + tax {}",
                record.invoice_value, computed
            ),
        ));
    };
    if difference > ARITHMETIC_TOLERANCE {
        return Some(ValidationError::new(
            "invoice_value",
            format!(
                "invoice value {} does not match taxable value + tax {} (difference {})",
                record.invoice_value, computed, difference
            ),
        ));
    }
    None
}

/// Parse an invoice date in any of the [`DATE_FORMATS`].
pub fn parse_invoice_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Validate a GSTIN by format.
///
/// A GSTIN is 15 upper-case characters: 2-digit state code, 10-character
/// PAN (5 letters, 4 digits, 1 letter), entity number (alphanumeric), the
/// letter `Z`, and a check character (alphanumeric). The check character
/// itself is not verified.
pub fn validate_gstin(gstin: &str) -> Result<(), GstinFormatError> {
    let err = |reason: String| GstinFormatError {
        value: gstin.into(),
        reason,
    };

    let chars: Vec<char> = gstin.chars().collect();
    if chars.len() != 15 {
        return Err(err(format!(
            "must be 15 characters, got {}",
            chars.len()
        )));
    }

    let is_upper_alnum = |c: char| c.is_ascii_digit() || c.is_ascii_uppercase();

    type CharCheck = fn(char) -> bool;
    let digit: CharCheck = |c| c.is_ascii_digit();
    let letter: CharCheck = |c| c.is_ascii_uppercase();

    let layout: [(std::ops::Range<usize>, CharCheck, &str); 4] = [
        (0..2, digit, "state code must be 2 digits"),
        (2..7, letter, "PAN must start with 5 letters"),
        (7..11, digit, "PAN must have 4 digits after the letters"),
        (11..12, letter, "PAN must end with a letter"),
    ];
    for (range, check, reason) in layout {
        if !chars[range].iter().all(|c| check(*c)) {
            return Err(err(reason.into()));
        }
    }

    if !is_upper_alnum(chars[12]) {
        return Err(err("entity number must be alphanumeric".into()));
    }
    if chars[13] != 'Z' {
        return Err(err("14th character must be 'Z'".into()));
    }
    if !is_upper_alnum(chars[14]) {
        return Err(err("check character must be alphanumeric".into()));
    }

    Ok(())
}
