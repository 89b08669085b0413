use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DocumentStatus, DocumentType, EventType, FacilityType};

/// Where an event was performed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Facility {
    pub name: String,
    pub facility_type: FacilityType,
    /// Repair-station or production certificate number, when recorded.
    pub certificate_number: Option<String>,
}

/// Who performed the event.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Performer {
    pub name: String,
    pub certification: Option<String>,
}

/// Supporting evidence attached to an event (photo, scan, measurement log).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvidenceItem {
    pub id: String,
    pub description: String,
    pub media_type: Option<String>,
    pub captured_at: DateTime<Utc>,
}

/// A document produced by the system for a specific event.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub id: String,
    pub document_type: DocumentType,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub signed_at: Option<DateTime<Utc>>,
}

/// A part consumed during a maintenance event.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PartConsumed {
    pub part_number: String,
    pub serial_number: Option<String>,
    pub description: String,
    pub quantity: u32,
}

/// One fact about a component's history.
///
/// Events are logically expected to be chronologically ordered with
/// non-decreasing hour/cycle counters. That invariant is checked, not
/// enforced at write time: the Exception Detection Engine reports
/// violations rather than rejecting the record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LifecycleEvent {
    pub id: String,
    pub component_id: String,
    pub event_type: EventType,
    pub occurred_at: DateTime<Utc>,
    pub facility: Facility,
    pub performer: Performer,
    /// Accumulated flight hours at the time of the event, when known.
    pub hours_at_event: Option<f64>,
    /// Accumulated flight cycles at the time of the event, when known.
    pub cycles_at_event: Option<u32>,
    pub aircraft: Option<String>,
    pub operator: Option<String>,
    pub work_order: Option<String>,
    pub cmm_reference: Option<String>,
    pub notes: Option<String>,
    /// Cryptographic hash of the record for tamper evidence, when present.
    pub record_hash: Option<String>,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
    #[serde(default)]
    pub generated_documents: Vec<GeneratedDocument>,
    #[serde(default)]
    pub parts_consumed: Vec<PartConsumed>,
}
