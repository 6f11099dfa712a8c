//! Simulated return filing.
//!
//! Nothing is sent anywhere: the simulator walks a fixed sequence of steps
//! with artificial delays and injected failures, and issues an
//! acknowledgment id on success.
//!
//! # Example
//!
//! ```rust
//! use gst_filing::filing::{SimulatorConfigBuilder, SubmissionSimulator, seeded_source};
//! use gst_filing::ingest::{InvoiceBook, invoice_template};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut book = InvoiceBook::new();
//! book.ingest(&invoice_template()).unwrap();
//! book.validate();
//!
//! let config = SimulatorConfigBuilder::new()
//!     .no_delays()
//!     .portal_failure_probability(0.0)
//!     .build()
//!     .unwrap();
//! let simulator = SubmissionSimulator::with_source(config, seeded_source(1)).unwrap();
//!
//! let ack = simulator.submit(&book).await.unwrap();
//! assert!(ack.id.starts_with("ARN-GSTR1-"));
//! # }
//! ```

mod config;
mod payload;
mod random;
mod receipt;
mod simulator;

pub use config::{SimulatorConfig, SimulatorConfigBuilder};
pub use random::{FailureSource, seeded_source};
pub use receipt::Acknowledgment;
pub use simulator::{
    Filing, ReturnKind, SubmissionError, SubmissionPhase, SubmissionSimulator, SubmissionState,
    SubmissionStep,
};
