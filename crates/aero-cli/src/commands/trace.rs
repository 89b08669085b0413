//! `aero trace`: score documentation completeness for one component.

use aero_engine::{ScanEngine, format_duration};
use aero_store::LibsqlStore;

use crate::cli::TraceArgs;

pub async fn handle(store: LibsqlStore, args: &TraceArgs, json: bool) -> anyhow::Result<()> {
    let engine = ScanEngine::new(store);
    let report = engine.trace_component(&args.component_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}: {}% documented ({}), {} of {} days accounted for over {} events, {} documents",
        args.component_id,
        report.score,
        report.rating,
        report.documented_days,
        report.total_days,
        report.total_events,
        report.total_documents
    );
    if report.gaps.is_empty() {
        println!("  no unexplained gaps over 30 days");
    } else {
        println!(
            "  {} gap(s), {} unaccounted",
            report.gap_count,
            format_duration(report.total_gap_days)
        );
        for gap in &report.gaps {
            println!(
                "  [{}] {} between {} on {} and {} on {}",
                gap.severity,
                format_duration(gap.gap_days),
                gap.from_event_type,
                gap.from_date.date_naive(),
                gap.to_event_type,
                gap.to_date.date_naive()
            );
        }
    }
    Ok(())
}
