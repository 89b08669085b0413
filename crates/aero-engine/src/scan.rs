//! Scan orchestration: load snapshot, run checks, dedup, persist, summarize.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use aero_core::clock::{Clock, SystemClock};
use aero_core::entities::{ComponentSnapshot, Exception};
use aero_core::enums::{ExceptionSeverity, ExceptionStatus, ExceptionType};
use aero_core::ids::PREFIX_EXCEPTION;
use aero_store::{ComponentStore, StoreError};

use crate::checks;
use crate::error::EngineError;
use crate::trace::{TraceReport, calculate_trace_completeness};

/// Severity breakdown plus idempotence counters for one scan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScanSummary {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    /// Exceptions persisted by this run. Zero on an immediate re-run.
    pub newly_detected: usize,
}

impl ScanSummary {
    fn tally(exceptions: &[Exception], newly_detected: usize) -> Self {
        let mut summary = Self {
            total: exceptions.len(),
            critical: 0,
            warning: 0,
            info: 0,
            newly_detected,
        };
        for exception in exceptions {
            match exception.severity {
                ExceptionSeverity::Critical => summary.critical += 1,
                ExceptionSeverity::Warning => summary.warning += 1,
                ExceptionSeverity::Info => summary.info += 1,
            }
        }
        summary
    }
}

/// Result of scanning one component: the full current exception set
/// (pre-existing and newly persisted) plus counts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScanOutcome {
    pub exceptions: Vec<Exception>,
    pub summary: ScanSummary,
}

/// The Exception Detection Engine.
///
/// Depends on nothing but the store and a clock. Deterministic given
/// identical input data: re-running immediately reports
/// `newly_detected = 0` and an identical total.
pub struct ScanEngine<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: ComponentStore> ScanEngine<S> {
    /// Engine on the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Engine on an injected clock (fixed in tests).
    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Access the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub(crate) async fn load(&self, component_id: &str) -> Result<ComponentSnapshot, EngineError> {
        match self.store.load_component_snapshot(component_id).await {
            Ok(snapshot) => Ok(snapshot),
            Err(StoreError::NotFound { component_id }) => {
                Err(EngineError::ComponentNotFound { component_id })
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Run all checks against one component, persist non-duplicate
    /// findings, and return the aggregate.
    ///
    /// Findings are persisted one at a time; a failed insert is logged and
    /// skipped so the remaining findings still land.
    ///
    /// # Errors
    ///
    /// `EngineError::ComponentNotFound` if the component does not exist;
    /// store errors from the snapshot load.
    pub async fn scan_component(&self, component_id: &str) -> Result<ScanOutcome, EngineError> {
        let snapshot = self.load(component_id).await?;
        let now = self.clock.now();
        let issues = checks::run_all_checks(&snapshot, now);
        debug!(component_id, issues = issues.len(), "checks complete");

        // Dedup key: (type, canonical evidence hash) over non-closed
        // exceptions. Resolved and false-positive records never suppress
        // re-detection.
        let mut seen: HashSet<(ExceptionType, String)> = HashSet::new();
        for exception in snapshot.exceptions.iter().filter(|e| !e.status.is_closed()) {
            seen.insert((exception.exception_type, exception.evidence.canonical_hash()?));
        }

        let mut exceptions = snapshot.exceptions;
        let mut newly_detected = 0;
        for issue in issues {
            let evidence_hash = issue.evidence.canonical_hash()?;
            if !seen.insert((issue.exception_type, evidence_hash.clone())) {
                continue;
            }
            let exception = Exception {
                id: exception_id(component_id, &evidence_hash, now),
                component_id: component_id.to_string(),
                exception_type: issue.exception_type,
                severity: issue.severity,
                title: issue.title,
                description: issue.description,
                evidence: issue.evidence,
                status: ExceptionStatus::Open,
                detected_at: now,
                resolved_by: None,
                resolved_at: None,
                resolution_notes: None,
            };
            match self.store.insert_exception(&exception).await {
                Ok(()) => {
                    exceptions.push(exception);
                    newly_detected += 1;
                }
                Err(error) => {
                    warn!(
                        component_id,
                        exception_type = %exception.exception_type,
                        %error,
                        "failed to persist exception, continuing with remaining findings"
                    );
                }
            }
        }

        let summary = ScanSummary::tally(&exceptions, newly_detected);
        Ok(ScanOutcome {
            exceptions,
            summary,
        })
    }

    /// Load a snapshot and score its trace completeness.
    ///
    /// For retired/scrapped components the accounted life ends at the
    /// terminal event rather than at "now".
    ///
    /// # Errors
    ///
    /// `EngineError::ComponentNotFound` if the component does not exist.
    pub async fn trace_component(&self, component_id: &str) -> Result<TraceReport, EngineError> {
        let snapshot = self.load(component_id).await?;
        let retired_date = if snapshot.component.status.is_terminal() {
            snapshot
                .events
                .iter()
                .rev()
                .find(|e| e.event_type.is_terminal())
                .map(|e| e.occurred_at)
        } else {
            None
        };
        Ok(calculate_trace_completeness(
            snapshot.component.manufacture_date,
            &snapshot.events,
            &snapshot.documents,
            retired_date,
            self.clock.now(),
        ))
    }
}

/// Deterministic exception id derived from the dedup key and detection
/// time, so retries within a run cannot mint divergent ids.
fn exception_id(component_id: &str, evidence_hash: &str, detected_at: DateTime<Utc>) -> String {
    let digest = blake3::hash(
        format!("{component_id}:{evidence_hash}:{}", detected_at.to_rfc3339()).as_bytes(),
    );
    let hex = digest.to_hex();
    format!("{PREFIX_EXCEPTION}-{}", &hex.as_str()[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{component, date, event};
    use aero_core::clock::FixedClock;
    use aero_core::enums::EventType;
    use aero_store::MemoryStore;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_component(component("cmp-1"));
        // Cycle regression plus a missing birth certificate document.
        let mut a = event("evt-1", EventType::Manufacture, date(2020, 1, 1));
        a.cycles_at_event = Some(100);
        // 366 days later: inside the supply-chain gap allowance.
        let mut b = event("evt-2", EventType::DetailedInspection, date(2021, 1, 1));
        b.cycles_at_event = Some(90);
        store.push_event(a).unwrap();
        store.push_event(b).unwrap();
        store
    }

    fn engine(store: MemoryStore) -> ScanEngine<MemoryStore> {
        ScanEngine::with_clock(store, Arc::new(FixedClock(date(2022, 6, 1))))
    }

    #[tokio::test]
    async fn scan_detects_and_persists() {
        let engine = engine(seeded_store());
        let outcome = engine.scan_component("cmp-1").await.unwrap();

        // Cycle regression (critical) + missing birth certificate document
        // (warning). The manufacture event exists, so only one birth
        // finding fires. The trailing window after a detailed_inspection is
        // in-service and produces no gap.
        assert_eq!(outcome.summary.newly_detected, 2);
        assert_eq!(outcome.summary.total, 2);
        assert_eq!(outcome.summary.critical, 1);
        assert_eq!(outcome.summary.warning, 1);
        assert_eq!(outcome.summary.info, 0);

        let persisted = engine
            .store()
            .load_component_snapshot("cmp-1")
            .await
            .unwrap()
            .exceptions;
        assert_eq!(persisted.len(), 2);
        assert!(persisted.iter().all(|e| e.status == ExceptionStatus::Open));
        assert!(persisted.iter().all(|e| e.detected_at == date(2022, 6, 1)));
    }

    #[tokio::test]
    async fn rescan_is_idempotent() {
        let engine = engine(seeded_store());
        let first = engine.scan_component("cmp-1").await.unwrap();
        let second = engine.scan_component("cmp-1").await.unwrap();

        assert_eq!(second.summary.newly_detected, 0);
        assert_eq!(second.summary.total, first.summary.total);
        assert_eq!(second.exceptions.len(), first.exceptions.len());
    }

    #[tokio::test]
    async fn resolved_exception_does_not_suppress_redetection() {
        let store = Arc::new(seeded_store());
        let engine =
            ScanEngine::with_clock(Arc::clone(&store), Arc::new(FixedClock(date(2022, 6, 1))));
        let first = engine.scan_component("cmp-1").await.unwrap();
        for exception in &first.exceptions {
            store
                .update_exception_status(
                    &exception.id,
                    ExceptionStatus::FalsePositive,
                    Some("inspector-1"),
                    None,
                )
                .await
                .unwrap();
        }

        // A later scan of unchanged data re-detects both findings.
        let later =
            ScanEngine::with_clock(Arc::clone(&store), Arc::new(FixedClock(date(2022, 7, 1))));
        let second = later.scan_component("cmp-1").await.unwrap();
        assert_eq!(second.summary.newly_detected, 2);
        assert_eq!(second.summary.total, 4);
    }

    #[tokio::test]
    async fn unknown_component_is_not_found() {
        let engine = engine(MemoryStore::new());
        let err = engine.scan_component("cmp-ghost").await.unwrap_err();
        assert!(
            matches!(err, EngineError::ComponentNotFound { component_id } if component_id == "cmp-ghost")
        );
    }

    #[tokio::test]
    async fn clean_component_yields_empty_summary() {
        let store = MemoryStore::new();
        store.insert_component(component("cmp-1"));
        let mut manufacture = event("evt-1", EventType::Manufacture, date(2020, 1, 1));
        manufacture.cycles_at_event = Some(0);
        store.push_event(manufacture).unwrap();
        store
            .push_document(crate::test_support::document(
                "doc-1",
                aero_core::enums::DocumentType::BirthCertificate,
            ))
            .unwrap();
        store
            .push_event(event("evt-2", EventType::Install, date(2020, 2, 1)))
            .unwrap();

        let engine = engine(store);
        let outcome = engine.scan_component("cmp-1").await.unwrap();
        assert_eq!(outcome.summary.total, 0);
        assert_eq!(outcome.summary.newly_detected, 0);
        assert!(outcome.exceptions.is_empty());
    }

    /// Store wrapper that fails persistence for one exception type.
    struct FlakyStore {
        inner: MemoryStore,
        fail_for: ExceptionType,
    }

    #[async_trait]
    impl ComponentStore for FlakyStore {
        async fn load_component_snapshot(
            &self,
            component_id: &str,
        ) -> Result<aero_core::entities::ComponentSnapshot, StoreError> {
            self.inner.load_component_snapshot(component_id).await
        }

        async fn list_component_ids(&self) -> Result<Vec<String>, StoreError> {
            self.inner.list_component_ids().await
        }

        async fn insert_exception(&self, exception: &Exception) -> Result<(), StoreError> {
            if exception.exception_type == self.fail_for {
                return Err(StoreError::Query("disk full".into()));
            }
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
    async fn persistence_failure_does_not_discard_other_findings() {
        let store = FlakyStore {
            inner: seeded_store(),
            fail_for: ExceptionType::CycleCountDiscrepancy,
        };
        let engine = ScanEngine::with_clock(store, Arc::new(FixedClock(date(2022, 6, 1))));

        let outcome = engine.scan_component("cmp-1").await.unwrap();
        // The cycle finding failed to persist; the birth-record finding
        // still landed and is reported.
        assert_eq!(outcome.summary.newly_detected, 1);
        assert_eq!(outcome.summary.total, 1);
        assert_eq!(
            outcome.exceptions[0].exception_type,
            ExceptionType::MissingBirthRecord
        );
    }

    #[tokio::test]
    async fn trace_component_uses_terminal_event_for_retired_parts() {
        let store = MemoryStore::new();
        let mut cmp = component("cmp-1");
        cmp.status = aero_core::enums::ComponentStatus::Retired;
        cmp.manufacture_date = date(2020, 1, 1);
        store.insert_component(cmp);
        store
            .push_event(event("evt-1", EventType::Install, date(2020, 1, 1)))
            .unwrap();
        store
            .push_event(event("evt-2", EventType::Retire, date(2020, 4, 10)))
            .unwrap();

        let engine = ScanEngine::with_clock(store, Arc::new(FixedClock(date(2026, 1, 1))));
        let report = engine.trace_component("cmp-1").await.unwrap();
        assert_eq!(report.total_days, 100);
        assert_eq!(report.score, 100);
    }
}
