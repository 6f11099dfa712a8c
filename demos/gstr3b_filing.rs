//! Prepare GSTR-3B from mock data and file it through the simulator.
//!
//! ```sh
//! cargo run --example gstr3b_filing -- high_liability
//! ```
//!
//! Scenarios: `compliant` (default), `high_liability`, `itc_mismatch`.

use std::error::Error;

use gst_filing::TaxHead;
use gst_filing::filing::{SimulatorConfig, SubmissionSimulator};
use gst_filing::mock::{MockApi, Scenario};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,gst_filing=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let scenario = match std::env::args().nth(1).as_deref() {
        None | Some("compliant") => Scenario::Compliant,
        Some("high_liability") => Scenario::HighLiability,
        Some("itc_mismatch") => Scenario::ItcMismatch,
        Some(other) => return Err(format!("unknown scenario '{other}'").into()),
    };

    let api = MockApi::new(scenario);
    let summary = api.gstr3b_summary();

    println!("GSTR-3B ({scenario:?})");
    println!("  3.1(a) taxable        {:>12}", summary.table_3_1.taxable_value);
    println!("  3.1(b) zero rated     {:>12}", summary.table_3_1.zero_rated_value);
    println!("  3.1(c) nil / exempt   {:>12}", summary.table_3_1.nil_exempt_value);
    println!("  5      exempt inward  {:>12}", summary.table_5.exempt_nil_value);
    println!("\n  {:<6} {:>12} {:>12} {:>12}", "Head", "Output tax", "ITC", "Payable");
    for head in TaxHead::ALL {
        println!(
            "  {:<6} {:>12} {:>12} {:>12}",
            head.label(),
            summary.table_3_1.tax.get(head),
            summary.table_4.available.get(head),
            summary.net_payable.get(head)
        );
    }
    println!("  Total payable: {}", summary.total_payable());

    let analysis = api.gstr9_summary().itc_analysis;
    println!("\nITC vs GSTR-2B: overall risk {:?}", analysis.overall_risk());
    for h in analysis.excess_claims() {
        println!("  {} claimed {} but only {} available", h.head.label(), h.claimed, h.available);
    }

    let simulator = SubmissionSimulator::new(SimulatorConfig::default())?;
    loop {
        match simulator.submit(&summary).await {
            Ok(ack) => {
                println!("\n{}", ack.receipt());
                break;
            }
            Err(e) => println!("\n{e}; retrying"),
        }
    }

    for entry in api.filing_calendar() {
        println!(
            "{:<8} {:<12} due {}  {:?}",
            entry.return_name, entry.period, entry.due_date, entry.status
        );
    }

    Ok(())
}
