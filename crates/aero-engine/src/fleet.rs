//! Fleet scanner: fan-out/fan-in over every component.
//!
//! Each component's scan is independent and touches disjoint rows, so
//! scans are dispatched as concurrent tasks and the results aggregated
//! into an arena of per-component outcomes. One component's failure never
//! aborts the sweep.

use futures::StreamExt;
use futures::stream;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use aero_core::enums::ExceptionSeverity;
use aero_store::ComponentStore;

use crate::error::EngineError;
use crate::scan::{ScanEngine, ScanOutcome};

/// Exception counts by severity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

/// A component whose scan failed, with the rendered error.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FleetFailure {
    pub component_id: String,
    pub error: String,
}

/// Aggregate result of a fleet sweep.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FleetSummary {
    pub total_components: usize,
    pub components_with_exceptions: usize,
    pub total_exceptions: usize,
    pub by_severity: SeverityCounts,
    pub failures: Vec<FleetFailure>,
}

impl<S: ComponentStore> ScanEngine<S> {
    /// Scan every component, up to `concurrency` at a time, and aggregate
    /// fleet-wide counts. Per-component failures are collected in
    /// `failures` rather than propagated.
    ///
    /// # Errors
    ///
    /// Only the initial id listing can fail the sweep as a whole.
    pub async fn scan_all_components(
        &self,
        concurrency: usize,
    ) -> Result<FleetSummary, EngineError> {
        let ids = self.store().list_component_ids().await?;
        let total_components = ids.len();
        debug!(total_components, "starting fleet scan");

        let results: Vec<(String, Result<ScanOutcome, EngineError>)> = stream::iter(ids)
            .map(|id| async move {
                let outcome = self.scan_component(&id).await;
                (id, outcome)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        let mut summary = FleetSummary {
            total_components,
            components_with_exceptions: 0,
            total_exceptions: 0,
            by_severity: SeverityCounts::default(),
            failures: Vec::new(),
        };
        for (component_id, result) in results {
            match result {
                Ok(outcome) => {
                    if outcome.summary.total > 0 {
                        summary.components_with_exceptions += 1;
                    }
                    summary.total_exceptions += outcome.summary.total;
                    for exception in &outcome.exceptions {
                        match exception.severity {
                            ExceptionSeverity::Critical => summary.by_severity.critical += 1,
                            ExceptionSeverity::Warning => summary.by_severity.warning += 1,
                            ExceptionSeverity::Info => summary.by_severity.info += 1,
                        }
                    }
                }
                Err(error) => {
                    warn!(component_id, %error, "component scan failed, continuing fleet sweep");
                    summary.failures.push(FleetFailure {
                        component_id,
                        error: error.to_string(),
                    });
                }
            }
        }
        summary.failures.sort_by(|a, b| a.component_id.cmp(&b.component_id));
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{component, date, document, event};
    use aero_core::clock::FixedClock;
    use aero_core::entities::{ComponentSnapshot, Exception};
    use aero_core::enums::{DocumentType, EventType, ExceptionStatus};
    use aero_store::{MemoryStore, StoreError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn fleet_store() -> MemoryStore {
        let store = MemoryStore::new();

        // cmp-clean: complete birth records, installed, nothing to flag.
        store.insert_component(component("cmp-clean"));
        let mut manufacture = event("evt-c1", EventType::Manufacture, date(2020, 1, 1));
        manufacture.component_id = "cmp-clean".into();
        store.push_event(manufacture).unwrap();
        let mut install = event("evt-c2", EventType::Install, date(2020, 2, 1));
        install.component_id = "cmp-clean".into();
        store.push_event(install).unwrap();
        let mut birth = document("doc-c1", DocumentType::BirthCertificate);
        birth.component_id = "cmp-clean".into();
        store.push_document(birth).unwrap();

        // cmp-dirty: cycle regression plus missing birth records.
        store.insert_component(component("cmp-dirty"));
        let mut a = event("evt-d1", EventType::ReceivingInspection, date(2022, 1, 1));
        a.component_id = "cmp-dirty".into();
        a.cycles_at_event = Some(500);
        let mut b = event("evt-d2", EventType::FunctionalTest, date(2022, 1, 10));
        b.component_id = "cmp-dirty".into();
        b.cycles_at_event = Some(450);
        store.push_event(a).unwrap();
        store.push_event(b).unwrap();

        store
    }

    #[tokio::test]
    async fn fleet_scan_aggregates_counts() {
        let engine = ScanEngine::with_clock(
            fleet_store(),
            Arc::new(FixedClock(date(2022, 1, 20))),
        );
        let summary = engine.scan_all_components(4).await.unwrap();

        assert_eq!(summary.total_components, 2);
        assert_eq!(summary.components_with_exceptions, 1);
        // cmp-dirty: cycle regression (critical) + two missing birth
        // records (warnings).
        assert_eq!(summary.total_exceptions, 3);
        assert_eq!(summary.by_severity.critical, 1);
        assert_eq!(summary.by_severity.warning, 2);
        assert_eq!(summary.by_severity.info, 0);
        assert!(summary.failures.is_empty());
    }

    #[tokio::test]
    async fn fleet_scan_is_idempotent() {
        let engine = ScanEngine::with_clock(
            fleet_store(),
            Arc::new(FixedClock(date(2022, 1, 20))),
        );
        let first = engine.scan_all_components(2).await.unwrap();
        let second = engine.scan_all_components(2).await.unwrap();
        assert_eq!(first.total_exceptions, second.total_exceptions);
        assert_eq!(first.by_severity, second.by_severity);
    }

    /// Store that lists a component it cannot load, as can happen under
    /// concurrent deletion.
    struct GhostStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl ComponentStore for GhostStore {
        async fn load_component_snapshot(
            &self,
            component_id: &str,
        ) -> Result<ComponentSnapshot, StoreError> {
            self.inner.load_component_snapshot(component_id).await
        }

        async fn list_component_ids(&self) -> Result<Vec<String>, StoreError> {
            let mut ids = self.inner.list_component_ids().await?;
            ids.push("cmp-ghost".into());
            Ok(ids)
        }

        async fn insert_exception(&self, exception: &Exception) -> Result<(), StoreError> {
            self.inner.insert_exception(exception).await
        }

        async fn update_exception_status(
            &self,
            exception_id: &str,
            status: ExceptionStatus,
            resolved_by: Option<&str>,
            notes: Option<&str>,
        ) -> Result<Exception, StoreError> {
            self.inner
                .update_exception_status(exception_id, status, resolved_by, notes)
                .await
        }
    }

    #[tokio::test]
    async fn one_failing_component_does_not_abort_the_sweep() {
        let engine = ScanEngine::with_clock(
            GhostStore {
                inner: fleet_store(),
            },
            Arc::new(FixedClock(date(2022, 1, 20))),
        );
        let summary = engine.scan_all_components(2).await.unwrap();

        assert_eq!(summary.total_components, 3);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].component_id, "cmp-ghost");
        // The healthy components were still scanned.
        assert_eq!(summary.total_exceptions, 3);
    }
}
