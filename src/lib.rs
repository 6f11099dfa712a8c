//! # gst-filing
//!
//! Return preparation helpers for Indian Goods & Services Tax (GST):
//! invoice upload parsing, per-record validation, GSTR-1 / GSTR-3B / GSTR-9
//! aggregation, and a simulated portal filing workflow.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Nothing here talks to the GSTN portal; submission is simulated.
//!
//! ## Quick Start
//!
//! ```rust
//! use gst_filing::core::*;
//! use rust_decimal_macros::dec;
//!
//! let record = InvoiceRecordBuilder::new("INV-001", "2024-06-15", "Acme Traders")
//!     .gstin("27AAAAA0000A1Z5")
//!     .amounts(dec!(10000), dec!(900), dec!(900), dec!(0))
//!     .invoice_value(dec!(11800))
//!     .hsn("8471", "Laptop")
//!     .build();
//!
//! let validated = validate_invoices(&[record]);
//! assert_eq!(validated[0].status, RecordStatus::Validated);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Record types, HSN reference table, validation |
//! | `ingest` | CSV upload parser, template, invoice book |
//! | `returns` | GSTR-1 rollups, GSTR-3B tables, GSTR-9 ITC analysis |
//! | `filing` | Simulated submission workflow (tokio timers) |
//! | `mock` | Scenario-based mock data context |
//! | `all` | Everything (also the default) |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "ingest")]
pub mod ingest;

#[cfg(feature = "returns")]
pub mod returns;

#[cfg(feature = "filing")]
pub mod filing;

#[cfg(feature = "mock")]
pub mod mock;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
