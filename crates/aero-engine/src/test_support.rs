//! Shared fixtures for engine tests.

use chrono::{DateTime, TimeZone, Utc};

use aero_core::entities::{
    Component, ComponentSnapshot, Document, Facility, LifecycleEvent, Performer,
};
use aero_core::enums::{ComponentStatus, DocumentSource, DocumentType, EventType, FacilityType};

pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn component(id: &str) -> Component {
    Component {
        id: id.to_string(),
        part_number: "PN-4410".into(),
        serial_number: format!("SN-{id}"),
        description: "Starter generator".into(),
        manufacture_date: date(2020, 1, 1),
        status: ComponentStatus::Serviceable,
        created_at: date(2020, 1, 1),
        updated_at: date(2020, 1, 1),
    }
}

/// Event at an operator facility; tweak fields per test.
pub fn event(id: &str, event_type: EventType, occurred_at: DateTime<Utc>) -> LifecycleEvent {
    LifecycleEvent {
        id: id.to_string(),
        component_id: "cmp-1".into(),
        event_type,
        occurred_at,
        facility: Facility {
            name: "Northline Air Line Maintenance".into(),
            facility_type: FacilityType::Operator,
            certificate_number: None,
        },
        performer: Performer {
            name: "R. Devi".into(),
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

/// Event at an MRO facility with a repair-station certificate on file.
pub fn mro_event(id: &str, event_type: EventType, occurred_at: DateTime<Utc>) -> LifecycleEvent {
    let mut e = event(id, event_type, occurred_at);
    e.facility = Facility {
        name: "Meridian Component Services".into(),
        facility_type: FacilityType::Mro,
        certificate_number: Some("FAA-MR5D".into()),
    };
    e
}

pub fn document(id: &str, document_type: DocumentType) -> Document {
    Document {
        id: id.to_string(),
        component_id: "cmp-1".into(),
        document_type,
        title: document_type.as_str().replace('_', " "),
        source: DocumentSource::Uploaded,
        issued_at: date(2020, 1, 2),
    }
}

pub fn snapshot(events: Vec<LifecycleEvent>, documents: Vec<Document>) -> ComponentSnapshot {
    ComponentSnapshot {
        component: component("cmp-1"),
        events,
        documents,
        exceptions: vec![],
        alerts: vec![],
    }
}
