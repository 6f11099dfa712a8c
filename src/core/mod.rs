//! Core record types, HSN reference data, and invoice validation.
//!
//! This module provides the foundational types for GST return preparation:
//! outward invoice records as uploaded for GSTR-1, supply records feeding
//! GSTR-3B and GSTR-9, and the validator that decides whether a record is
//! ready to be filed.

mod builder;
mod error;
pub mod hsn;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use hsn::{HsnEntry, SupplyKind, lookup_hsn};
pub use types::*;
pub use validation::*;
