//! Invoice upload: template, parser, and the in-memory invoice book.
//!
//! The upload format is delimited text with a header row followed by one
//! invoice line per row. Columns are positional (see [`TEMPLATE_HEADERS`]);
//! the header only tells the parser how many fields a complete row has.
//!
//! # Example
//!
//! ```
//! use gst_filing::ingest::*;
//!
//! let mut book = InvoiceBook::new();
//! let added = book.ingest(&invoice_template()).unwrap();
//! assert_eq!(added, 2);
//!
//! let counts = book.validate();
//! assert_eq!(counts.validated, 2);
//! assert!(book.is_ready());
//! ```

mod book;
mod parser;
mod template;

pub use book::InvoiceBook;
pub use parser::{
    ParseOptions, parse_invoice_bytes, parse_invoices, parse_invoices_from, parse_invoices_with,
};
pub use template::{TEMPLATE_FILENAME, TEMPLATE_HEADERS, export_invoices, invoice_template};
