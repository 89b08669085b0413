//! `aero fleet`: scan every component and aggregate counts.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use aero_engine::ScanEngine;
use aero_store::LibsqlStore;

use crate::cli::FleetArgs;
use crate::config::AeroConfig;

pub async fn handle(
    store: LibsqlStore,
    args: &FleetArgs,
    config: &AeroConfig,
    json: bool,
) -> anyhow::Result<()> {
    let concurrency = args.concurrency.unwrap_or(config.fleet.concurrency);
    let engine = ScanEngine::new(store);

    let spinner = if json {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        bar.set_message(format!("scanning fleet ({concurrency} concurrent)"));
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    };
    let summary = engine.scan_all_components(concurrency).await;
    spinner.finish_and_clear();
    let summary = summary?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} component(s) scanned: {} with exceptions, {} exception(s) total",
        summary.total_components, summary.components_with_exceptions, summary.total_exceptions
    );
    println!(
        "  by severity: {} critical, {} warning, {} info",
        summary.by_severity.critical, summary.by_severity.warning, summary.by_severity.info
    );
    for failure in &summary.failures {
        println!("  failed: {} ({})", failure.component_id, failure.error);
    }
    Ok(())
}
