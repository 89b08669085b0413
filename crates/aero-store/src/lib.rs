//! # aero-store
//!
//! Component persistence for Aerotrace.
//!
//! The engines depend on the [`ComponentStore`] trait only; any storage
//! technology can implement it. This crate ships two implementations:
//!
//! - [`MemoryStore`]: in-process `HashMap` store for tests and embedding.
//! - [`LibsqlStore`]: libSQL database (file or `:memory:`) with embedded,
//!   idempotent migrations and a store-level unique index that guards the
//!   exception dedup key against concurrent duplicate races.

pub mod error;
pub mod helpers;
mod memory;
mod migrations;
mod repo;
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use repo::ComponentStore;
pub use sqlite::LibsqlStore;

#[cfg(test)]
mod tests {
    use super::*;
    use aero_core::entities::{Component, Document, Facility, LifecycleEvent, Performer};
    use aero_core::enums::{
        ComponentStatus, DocumentSource, DocumentType, EventType, FacilityType,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn seed_component() -> Component {
        Component {
            id: "cmp-1".into(),
            part_number: "PN-9902".into(),
            serial_number: "SN-7265".into(),
            description: "Air cycle machine".into(),
            manufacture_date: date(2021, 5, 1),
            status: ComponentStatus::Serviceable,
            created_at: date(2021, 5, 1),
            updated_at: date(2021, 5, 1),
        }
    }

    fn seed_event(id: &str, event_type: EventType, occurred_at: DateTime<Utc>) -> LifecycleEvent {
        LifecycleEvent {
            id: id.to_string(),
            component_id: "cmp-1".into(),
            event_type,
            occurred_at,
            facility: Facility {
                name: "Calverton Aerospace Manufacturing".into(),
                facility_type: FacilityType::Manufacturer,
                certificate_number: Some("PC-2201".into()),
            },
            performer: Performer {
                name: "Final Assembly Cell 3".into(),
                certification: None,
            },
            hours_at_event: Some(0.0),
            cycles_at_event: Some(0),
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

    fn seed_document() -> Document {
        Document {
            id: "doc-1".into(),
            component_id: "cmp-1".into(),
            document_type: DocumentType::BirthCertificate,
            title: "Certificate of Origin".into(),
            source: DocumentSource::Uploaded,
            issued_at: date(2021, 5, 2),
        }
    }

    /// Both store implementations must present identical snapshots for
    /// identical seed data: the engines cannot tell them apart.
    #[tokio::test]
    async fn memory_and_libsql_stores_agree_on_snapshot_shape() {
        let events = [
            seed_event("evt-2", EventType::ReleaseToService, date(2021, 6, 1)),
            seed_event("evt-1", EventType::Manufacture, date(2021, 5, 1)),
        ];

        let memory = MemoryStore::new();
        memory.insert_component(seed_component());
        for event in &events {
            memory.push_event(event.clone()).unwrap();
        }
        memory.push_document(seed_document()).unwrap();

        let sqlite = LibsqlStore::open_local(":memory:").await.unwrap();
        sqlite.insert_component(&seed_component()).await.unwrap();
        for event in &events {
            sqlite.insert_event(event).await.unwrap();
        }
        sqlite.insert_document(&seed_document()).await.unwrap();

        let from_memory = memory.load_component_snapshot("cmp-1").await.unwrap();
        let from_sqlite = sqlite.load_component_snapshot("cmp-1").await.unwrap();
        assert_eq!(from_memory, from_sqlite);
        assert_eq!(from_memory.events[0].id, "evt-1");

        assert_eq!(
            memory.list_component_ids().await.unwrap(),
            sqlite.list_component_ids().await.unwrap()
        );
    }
}
