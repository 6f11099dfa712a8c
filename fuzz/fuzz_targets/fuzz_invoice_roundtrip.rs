#![no_main]

use gst_filing::ingest::{export_invoices, parse_invoices};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(records) = parse_invoices(s) else {
        return;
    };
    // Exported records must parse back to the same number of rows.
    let exported = export_invoices(&records);
    let reparsed = parse_invoices(&exported).expect("exported CSV must parse");
    assert_eq!(records.len(), reparsed.len());
});
