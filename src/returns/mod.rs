//! Return aggregation for GSTR-1, GSTR-3B and GSTR-9.
//!
//! Every summary is a pure function of its input records and is recomputed
//! from scratch on each call.
//!
//! # Example
//!
//! ```rust
//! use gst_filing::returns::{Gstr3bSummary, net_payable};
//! use gst_filing::{InwardSupplyRecord, OutwardSupplyRecord, SupplyType, TaxAmounts};
//! use rust_decimal_macros::dec;
//!
//! let outward = vec![OutwardSupplyRecord::new(
//!     SupplyType::B2B,
//!     dec!(100000),
//!     TaxAmounts::new(dec!(9000), dec!(9000), dec!(0), dec!(0)),
//! )];
//! let inward = vec![InwardSupplyRecord::new(
//!     dec!(50000),
//!     TaxAmounts::new(dec!(4500), dec!(4500), dec!(0), dec!(0)),
//!     dec!(9000),
//!     dec!(0),
//! )];
//!
//! let summary = Gstr3bSummary::compute(&outward, &inward);
//! assert_eq!(summary.net_payable.cgst, dec!(4500));
//! assert_eq!(summary.total_payable(), dec!(9000));
//! ```

mod gstr1;
mod gstr3b;
mod gstr9;
pub mod policy;

pub use gstr1::{
    CategoryRollup, CategorySummary, Gstr1Summary, HSN_NOT_SPECIFIED, HsnSummary, hsn_rollup,
};
pub use gstr3b::{Gstr3bSummary, Table4, Table5, Table31, net_payable};
pub use gstr9::{Gstr9Summary, ItcAnalysis, ItcHeadAnalysis, analyze_itc};
pub use policy::{ItcStatus, RiskLevel};
