//! Downloadable upload template and CSV export in the same layout.

use rust_decimal::Decimal;

use crate::core::InvoiceRecord;

/// Suggested file name for the downloadable template.
pub const TEMPLATE_FILENAME: &str = "gstr1_invoice_template.csv";

/// Upload columns in positional order.
pub const TEMPLATE_HEADERS: [&str; 17] = [
    "Invoice Number",
    "Invoice Date",
    "Customer Name",
    "Customer GSTIN",
    "Place of Supply",
    "Invoice Value",
    "Taxable Value",
    "CGST Rate",
    "CGST Amount",
    "SGST Rate",
    "SGST Amount",
    "IGST Rate",
    "IGST Amount",
    "HSN Code",
    "Description",
    "Quantity",
    "Rate",
];

const SAMPLE_ROWS: [[&str; 17]; 2] = [
    [
        "INV-001",
        "2024-04-15",
        "ABC Enterprises",
        "27AAAAA0000A1Z5",
        "Maharashtra",
        "11800",
        "10000",
        "9",
        "900",
        "9",
        "900",
        "0",
        "0",
        "8471",
        "Laptop",
        "1",
        "10000",
    ],
    [
        "INV-002",
        "2024-04-18",
        "XYZ Traders",
        "29BBBBB1111B1Z6",
        "Karnataka",
        "5900",
        "5000",
        "0",
        "0",
        "0",
        "0",
        "18",
        "900",
        "8517",
        "Mobile Phone",
        "2",
        "2500",
    ],
];

/// The downloadable template: header plus two example rows.
///
/// Both example rows parse and validate cleanly.
pub fn invoice_template() -> String {
    let mut out = String::new();
    push_row(&mut out, TEMPLATE_HEADERS);
    for row in SAMPLE_ROWS {
        push_row(&mut out, row);
    }
    out
}

/// Write records back out in the upload layout (e.g. for correcting
/// rejected rows and re-uploading).
pub fn export_invoices(records: &[InvoiceRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, TEMPLATE_HEADERS);
    for r in records {
        let amounts = [
            r.invoice_value,
            r.taxable_value,
            r.cgst_rate,
            r.cgst_amount,
            r.sgst_rate,
            r.sgst_amount,
            r.igst_rate,
            r.igst_amount,
            r.quantity,
            r.rate,
        ]
        .map(decimal_field);
        let fields: [&str; 17] = [
            &r.invoice_number,
            &r.invoice_date,
            &r.customer_name,
            &r.customer_gstin,
            &r.place_of_supply,
            &amounts[0],
            &amounts[1],
            &amounts[2],
            &amounts[3],
            &amounts[4],
            &amounts[5],
            &amounts[6],
            &amounts[7],
            &r.hsn_code,
            &r.description,
            &amounts[8],
            &amounts[9],
        ];
        push_row(&mut out, fields);
    }
    out
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

fn push_field(out: &mut String, value: &str) {
    if !value.contains([',', '"', '\n', '\r']) {
        out.push_str(value);
        return;
    }
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

fn decimal_field(d: Decimal) -> String {
    d.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceRecordBuilder, RecordStatus, validate_invoices};
    use crate::ingest::parse_invoices;
    use rust_decimal_macros::dec;

    #[test]
    fn template_has_header_and_two_rows() {
        let t = invoice_template();
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Invoice Number,Invoice Date"));
        assert_eq!(lines[1].split(',').count(), 17);
    }

    #[test]
    fn template_rows_validate() {
        let records = validate_invoices(&parse_invoices(&invoice_template()).unwrap());
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.status == RecordStatus::Validated));
    }

    #[test]
    fn export_quotes_fields_with_commas() {
        let record = InvoiceRecordBuilder::new("INV-9", "2024-06-15", "Sharma, Sons & \"Co\"")
            .amounts(dec!(100.50), dec!(0), dec!(0), dec!(18.09))
            .hsn("9983", "Consulting")
            .build();
        let csv = export_invoices(&[record]);
        assert!(csv.contains("\"Sharma, Sons & \"\"Co\"\"\""));

        let parsed = parse_invoices(&csv).unwrap();
        assert_eq!(parsed[0].customer_name, "Sharma, Sons & \"Co\"");
        assert_eq!(parsed[0].taxable_value, dec!(100.50));
        assert_eq!(parsed[0].invoice_value, dec!(118.59));
    }
}
