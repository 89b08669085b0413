//! `aero import`: load a JSON fixture into the database.

use anyhow::Context;
use serde::Deserialize;

use aero_core::entities::{Alert, Component, Document, LifecycleEvent};
use aero_store::LibsqlStore;

use crate::cli::ImportArgs;

/// One component with its nested history, as found in fixture files.
#[derive(Debug, Deserialize)]
struct ComponentRecord {
    component: Component,
    #[serde(default)]
    events: Vec<LifecycleEvent>,
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    alerts: Vec<Alert>,
}

pub async fn handle(store: &LibsqlStore, args: &ImportArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let records: Vec<ComponentRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    for record in records {
        let component = store
            .insert_component(&record.component)
            .await
            .with_context(|| {
                format!(
                    "failed to import component {}/{}",
                    record.component.part_number, record.component.serial_number
                )
            })?;

        let mut event_count = 0usize;
        for mut event in record.events {
            event.component_id.clone_from(&component.id);
            store.insert_event(&event).await?;
            event_count += 1;
        }
        let mut document_count = 0usize;
        for mut document in record.documents {
            document.component_id.clone_from(&component.id);
            store.insert_document(&document).await?;
            document_count += 1;
        }
        for mut alert in record.alerts {
            alert.component_id.clone_from(&component.id);
            store.insert_alert(&alert).await?;
        }

        println!(
            "imported {} ({} {}): {event_count} events, {document_count} documents",
            component.id, component.part_number, component.serial_number
        );
    }
    Ok(())
}
