//! Structured evidence payloads for exceptions.
//!
//! Each exception type carries exactly one evidence shape identifying the
//! records that triggered the finding: enough for a human to reconstruct
//! it and for a later scan to deduplicate it. Dedup compares a canonical
//! structural hash rather than raw strings, so field-order drift between
//! runs can never produce false negatives.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DocumentType, EventType, ExceptionType};

/// Which half of the birth record is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BirthRecordKind {
    ManufactureEvent,
    BirthCertificateDocument,
}

/// The two shapes of a date/sequence inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SequenceAnomalyKind {
    OutOfOrderDates,
    DoubleInstall,
}

/// Tagged union of evidence shapes, one variant per exception type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvidencePayload {
    CycleRegression {
        prev_event_id: String,
        next_event_id: String,
        prev_date: DateTime<Utc>,
        next_date: DateTime<Utc>,
        prev_cycles: u32,
        next_cycles: u32,
    },
    CycleRate {
        prev_event_id: String,
        next_event_id: String,
        prev_date: DateTime<Utc>,
        next_date: DateTime<Utc>,
        delta_cycles: u32,
        elapsed_days: i64,
        per_day: f64,
    },
    HoursRegression {
        prev_event_id: String,
        next_event_id: String,
        prev_date: DateTime<Utc>,
        next_date: DateTime<Utc>,
        prev_hours: f64,
        next_hours: f64,
    },
    HoursRate {
        prev_event_id: String,
        next_event_id: String,
        prev_date: DateTime<Utc>,
        next_date: DateTime<Utc>,
        delta_hours: f64,
        elapsed_days: i64,
        per_day: f64,
    },
    DocumentationGap {
        prev_event_id: String,
        prev_event_type: EventType,
        prev_date: DateTime<Utc>,
        /// `None` models the trailing window from the last event to "now".
        next_event_id: Option<String>,
        next_event_type: Option<EventType>,
        next_date: DateTime<Utc>,
        gap_days: i64,
    },
    MissingReleaseCertificate {
        event_id: String,
        event_date: DateTime<Utc>,
    },
    MissingBirthRecord {
        missing: BirthRecordKind,
    },
    SequenceAnomaly {
        anomaly: SequenceAnomalyKind,
        first_event_id: String,
        first_date: DateTime<Utc>,
        second_event_id: String,
        second_date: DateTime<Utc>,
    },
    StaleDraftDocument {
        event_id: String,
        document_id: String,
        document_type: DocumentType,
        created_at: DateTime<Utc>,
        age_days: i64,
    },
    UncertifiedFacility {
        event_id: String,
        event_type: EventType,
        event_date: DateTime<Utc>,
        facility_name: String,
    },
}

impl EvidencePayload {
    /// The exception type this evidence shape belongs to.
    #[must_use]
    pub const fn expected_exception_type(&self) -> ExceptionType {
        match self {
            Self::CycleRegression { .. } => ExceptionType::CycleCountDiscrepancy,
            Self::CycleRate { .. } => ExceptionType::ImplausibleCycleRate,
            Self::HoursRegression { .. } => ExceptionType::FlightHoursDiscrepancy,
            Self::HoursRate { .. } => ExceptionType::ImplausibleHoursRate,
            Self::DocumentationGap { .. } => ExceptionType::DocumentationGap,
            Self::MissingReleaseCertificate { .. } => ExceptionType::MissingReleaseCertificate,
            Self::MissingBirthRecord { .. } => ExceptionType::MissingBirthRecord,
            Self::SequenceAnomaly { .. } => ExceptionType::DateSequenceError,
            Self::StaleDraftDocument { .. } => ExceptionType::StaleDraftDocument,
            Self::UncertifiedFacility { .. } => ExceptionType::UncertifiedFacility,
        }
    }

    /// Canonical structural hash of the payload, used as the dedup key
    /// together with the exception type.
    ///
    /// Serializes to a `serde_json::Value` (whose object maps are ordered
    /// `BTreeMap`s, so key order is always lexicographic regardless of how
    /// the payload was constructed) and hashes the compact rendering with
    /// BLAKE3.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the payload cannot be represented as
    /// JSON (non-finite floats).
    pub fn canonical_hash(&self) -> Result<String, serde_json::Error> {
        let value = serde_json::to_value(self)?;
        Ok(blake3::hash(value.to_string().as_bytes())
            .to_hex()
            .to_string())
    }
}
