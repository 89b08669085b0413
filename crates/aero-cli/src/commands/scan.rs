//! `aero scan`: run the exception detection engine on one component.

use aero_engine::ScanEngine;
use aero_store::LibsqlStore;

use crate::cli::ScanArgs;

pub async fn handle(store: LibsqlStore, args: &ScanArgs, json: bool) -> anyhow::Result<()> {
    let engine = ScanEngine::new(store);
    let outcome = engine.scan_component(&args.component_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let summary = &outcome.summary;
    println!(
        "{}: {} exception(s) ({} critical, {} warning, {} info), {} new this scan",
        args.component_id,
        summary.total,
        summary.critical,
        summary.warning,
        summary.info,
        summary.newly_detected
    );
    for exception in &outcome.exceptions {
        println!(
            "  [{}] {} {}: {}",
            exception.severity, exception.status, exception.exception_type, exception.title
        );
    }
    Ok(())
}
