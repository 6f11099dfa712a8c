#![no_main]

use gst_filing::ingest::{ParseOptions, parse_invoice_bytes};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are fine, panics are bugs.
    if let Ok(records) = parse_invoice_bytes(data, &ParseOptions::default()) {
        let _ = gst_filing::validate_invoices(&records);
    }
});
