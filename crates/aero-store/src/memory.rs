//! In-process component store.
//!
//! Backs engine tests and embedded use. Seeding happens through the
//! inherent `insert_*`/`push_*` methods; the engines only ever see the
//! [`ComponentStore`] trait surface.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use aero_core::entities::{Alert, Component, ComponentSnapshot, Document, Exception, LifecycleEvent};
use aero_core::enums::ExceptionStatus;

use crate::error::StoreError;
use crate::repo::ComponentStore;

#[derive(Debug, Clone)]
struct StoredComponent {
    component: Component,
    events: Vec<LifecycleEvent>,
    documents: Vec<Document>,
    exceptions: Vec<Exception>,
    alerts: Vec<Alert>,
}

/// `HashMap`-backed store keyed by component id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, StoredComponent>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, StoredComponent>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, StoredComponent>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a component. Replaces any previous entry with the same id.
    pub fn insert_component(&self, component: Component) {
        self.write().insert(
            component.id.clone(),
            StoredComponent {
                component,
                events: Vec::new(),
                documents: Vec::new(),
                exceptions: Vec::new(),
                alerts: Vec::new(),
            },
        );
    }

    /// Append a lifecycle event to its component.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the component is not registered.
    pub fn push_event(&self, event: LifecycleEvent) -> Result<(), StoreError> {
        let mut guard = self.write();
        let stored = guard
            .get_mut(&event.component_id)
            .ok_or_else(|| StoreError::NotFound {
                component_id: event.component_id.clone(),
            })?;
        stored.events.push(event);
        Ok(())
    }

    /// Attach a component-level document.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the component is not registered.
    pub fn push_document(&self, document: Document) -> Result<(), StoreError> {
        let mut guard = self.write();
        let stored = guard
            .get_mut(&document.component_id)
            .ok_or_else(|| StoreError::NotFound {
                component_id: document.component_id.clone(),
            })?;
        stored.documents.push(document);
        Ok(())
    }

    /// Attach an alert.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the component is not registered.
    pub fn push_alert(&self, alert: Alert) -> Result<(), StoreError> {
        let mut guard = self.write();
        let stored = guard
            .get_mut(&alert.component_id)
            .ok_or_else(|| StoreError::NotFound {
                component_id: alert.component_id.clone(),
            })?;
        stored.alerts.push(alert);
        Ok(())
    }

    /// Seed a pre-existing exception (e.g. from a prior scan or review).
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the component is not registered.
    pub fn push_exception(&self, exception: Exception) -> Result<(), StoreError> {
        let mut guard = self.write();
        let stored = guard
            .get_mut(&exception.component_id)
            .ok_or_else(|| StoreError::NotFound {
                component_id: exception.component_id.clone(),
            })?;
        stored.exceptions.push(exception);
        Ok(())
    }
}

#[async_trait]
impl ComponentStore for MemoryStore {
    async fn load_component_snapshot(
        &self,
        component_id: &str,
    ) -> Result<ComponentSnapshot, StoreError> {
        let guard = self.read();
        let stored = guard.get(component_id).ok_or_else(|| StoreError::NotFound {
            component_id: component_id.to_string(),
        })?;
        let mut events = stored.events.clone();
        events.sort_by(|a, b| {
            a.occurred_at
                .cmp(&b.occurred_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(ComponentSnapshot {
            component: stored.component.clone(),
            events,
            documents: stored.documents.clone(),
            exceptions: stored.exceptions.clone(),
            alerts: stored.alerts.clone(),
        })
    }

    async fn list_component_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut ids: Vec<String> = self.read().keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    async fn insert_exception(&self, exception: &Exception) -> Result<(), StoreError> {
        self.push_exception(exception.clone())
    }

    async fn update_exception_status(
        &self,
        exception_id: &str,
        status: ExceptionStatus,
        resolved_by: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Exception, StoreError> {
        let mut guard = self.write();
        let exception = guard
            .values_mut()
            .flat_map(|stored| stored.exceptions.iter_mut())
            .find(|e| e.id == exception_id)
            .ok_or_else(|| StoreError::ExceptionNotFound {
                exception_id: exception_id.to_string(),
            })?;

        if !exception.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                exception_id: exception_id.to_string(),
                from: exception.status,
                to: status,
            });
        }

        exception.status = status;
        if status.is_closed() {
            exception.resolved_at = Some(Utc::now());
            exception.resolved_by = resolved_by.map(String::from);
            exception.resolution_notes = notes.map(String::from);
        }
        Ok(exception.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_core::enums::{
        ComponentStatus, EventType, ExceptionSeverity, ExceptionType, FacilityType,
    };
    use aero_core::entities::{Facility, Performer};
    use aero_core::evidence::{BirthRecordKind, EvidencePayload};
    use chrono::{DateTime, TimeZone};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn component(id: &str) -> Component {
        Component {
            id: id.to_string(),
            part_number: "PN-7731".into(),
            serial_number: format!("SN-{id}"),
            description: "Hydraulic pump".into(),
            manufacture_date: date(2020, 1, 1),
            status: ComponentStatus::Serviceable,
            created_at: date(2020, 1, 1),
            updated_at: date(2020, 1, 1),
        }
    }

    fn event(id: &str, component_id: &str, occurred: DateTime<Utc>) -> LifecycleEvent {
        LifecycleEvent {
            id: id.to_string(),
            component_id: component_id.to_string(),
            event_type: EventType::Repair,
            occurred_at: occurred,
            facility: Facility {
                name: "Acme Aero".into(),
                facility_type: FacilityType::Mro,
                certificate_number: Some("FAA-XY4R".into()),
            },
            performer: Performer {
                name: "J. Ortiz".into(),
                certification: None,
            },
            hours_at_event: None,
            cycles_at_event: None,
            aircraft: None,
            operator: None,
            work_order: None,
            cmm_reference: None,
            notes: None,
            record_hash: None,
            evidence: vec![],
            generated_documents: vec![],
            parts_consumed: vec![],
        }
    }

    fn exception(id: &str, component_id: &str) -> Exception {
        Exception {
            id: id.to_string(),
            component_id: component_id.to_string(),
            exception_type: ExceptionType::MissingBirthRecord,
            severity: ExceptionSeverity::Warning,
            title: "No birth certificate on file".into(),
            description: "Component has no birth certificate document".into(),
            evidence: EvidencePayload::MissingBirthRecord {
                missing: BirthRecordKind::BirthCertificateDocument,
            },
            status: ExceptionStatus::Open,
            detected_at: date(2024, 1, 1),
            resolved_by: None,
            resolved_at: None,
            resolution_notes: None,
        }
    }

    #[tokio::test]
    async fn snapshot_sorts_events_ascending() {
        let store = MemoryStore::new();
        store.insert_component(component("cmp-1"));
        store.push_event(event("evt-b", "cmp-1", date(2023, 5, 1))).unwrap();
        store.push_event(event("evt-a", "cmp-1", date(2021, 2, 1))).unwrap();
        store.push_event(event("evt-c", "cmp-1", date(2022, 8, 1))).unwrap();

        let snapshot = store.load_component_snapshot("cmp-1").await.unwrap();
        let ids: Vec<&str> = snapshot.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["evt-a", "evt-c", "evt-b"]);
    }

    #[tokio::test]
    async fn load_unknown_component_is_not_found() {
        let store = MemoryStore::new();
        let err = store.load_component_snapshot("cmp-missing").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { component_id } if component_id == "cmp-missing"));
    }

    #[tokio::test]
    async fn push_event_requires_component() {
        let store = MemoryStore::new();
        let err = store.push_event(event("evt-1", "cmp-nope", date(2024, 1, 1))).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_component_ids_is_sorted() {
        let store = MemoryStore::new();
        store.insert_component(component("cmp-b"));
        store.insert_component(component("cmp-a"));
        store.insert_component(component("cmp-c"));
        assert_eq!(
            store.list_component_ids().await.unwrap(),
            vec!["cmp-a", "cmp-b", "cmp-c"]
        );
    }

    #[tokio::test]
    async fn insert_exception_appears_in_snapshot() {
        let store = MemoryStore::new();
        store.insert_component(component("cmp-1"));
        store.insert_exception(&exception("exc-1", "cmp-1")).await.unwrap();

        let snapshot = store.load_component_snapshot("cmp-1").await.unwrap();
        assert_eq!(snapshot.exceptions.len(), 1);
        assert_eq!(snapshot.exceptions[0].id, "exc-1");
    }

    #[tokio::test]
    async fn review_transition_stamps_resolution() {
        let store = MemoryStore::new();
        store.insert_component(component("cmp-1"));
        store.push_exception(exception("exc-1", "cmp-1")).unwrap();

        let updated = store
            .update_exception_status(
                "exc-1",
                ExceptionStatus::Resolved,
                Some("inspector-4"),
                Some("counters re-keyed from logbook"),
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ExceptionStatus::Resolved);
        assert_eq!(updated.resolved_by.as_deref(), Some("inspector-4"));
        assert!(updated.resolved_at.is_some());
    }

    #[tokio::test]
    async fn review_rejects_forbidden_transition() {
        let store = MemoryStore::new();
        store.insert_component(component("cmp-1"));
        let mut exc = exception("exc-1", "cmp-1");
        exc.status = ExceptionStatus::Resolved;
        store.push_exception(exc).unwrap();

        let err = store
            .update_exception_status("exc-1", ExceptionStatus::Open, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn update_unknown_exception_errors() {
        let store = MemoryStore::new();
        let err = store
            .update_exception_status("exc-ghost", ExceptionStatus::Resolved, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ExceptionNotFound { .. }));
    }
}
