//! Upload an invoice CSV, validate it and print the GSTR-1 preview.
//!
//! ```sh
//! cargo run --example gstr1_upload -- invoices.csv
//! RUST_LOG=debug cargo run --example gstr1_upload
//! ```
//!
//! Without an argument the downloadable template is used.

use std::error::Error;

use gst_filing::ingest::{InvoiceBook, export_invoices, invoice_template};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,gst_filing=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => invoice_template(),
    };

    let mut book = InvoiceBook::new();
    book.ingest(&text)?;
    let counts = book.validate();
    println!(
        "{} invoices: {} validated, {} with errors",
        counts.total(),
        counts.validated,
        counts.error
    );

    for record in book.rejected() {
        println!("  {} ({})", record.invoice_number, record.id);
        for error in &record.errors {
            println!("    - {error}");
        }
    }

    let summary = book.summary();
    println!("\nCategory summary");
    for (category, s) in summary.categories.iter() {
        println!(
            "  {:<10} {:>4} invoices  taxable {:>12}  tax {:>10}",
            category.label(),
            s.count,
            s.taxable_value,
            s.total_tax()
        );
    }
    let total = &summary.categories.total;
    println!(
        "  {:<10} {:>4} invoices  taxable {:>12}  tax {:>10}",
        "Total",
        total.count,
        total.taxable_value,
        total.total_tax()
    );

    println!("\nHSN summary");
    for h in &summary.hsn {
        let rate = h
            .reference_rate
            .map(|r| format!("{r}%"))
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:<14} {:<24} qty {:>6}  taxable {:>12}  tax {:>10}  ref rate {}",
            h.hsn_code, h.description, h.quantity, h.taxable_value, h.tax_amount, rate
        );
    }

    if !book.is_ready() {
        let rejected: Vec<_> = book.rejected().cloned().collect();
        println!("\nRows to correct:\n{}", export_invoices(&rejected));
    }

    Ok(())
}
