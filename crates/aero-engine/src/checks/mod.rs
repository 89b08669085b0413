//! The eight independent check functions of the Exception Detection Engine.
//!
//! Each check is a pure function over the fields it needs, independently
//! testable, and returns zero or more [`DetectedIssue`]s. Absent optional
//! fields (counters, certificates) are "no data": checks skip what they
//! cannot evaluate, they never error.

use chrono::{DateTime, Utc};

use aero_core::entities::ComponentSnapshot;
use aero_core::enums::{ExceptionSeverity, ExceptionType};
use aero_core::evidence::EvidencePayload;

mod counters;
mod facility;
mod gaps;
mod records;
mod sequence;

pub use counters::{check_cycle_counters, check_hour_counters};
pub use facility::check_facility_certification;
pub use gaps::check_documentation_gaps;
pub use records::{check_birth_records, check_document_staleness, check_release_certificates};
pub use sequence::check_event_sequence;

/// A finding produced by a check, before dedup and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedIssue {
    pub exception_type: ExceptionType,
    pub severity: ExceptionSeverity,
    pub title: String,
    pub description: String,
    pub evidence: EvidencePayload,
}

/// Run every check against a loaded snapshot.
#[must_use]
pub fn run_all_checks(snapshot: &ComponentSnapshot, now: DateTime<Utc>) -> Vec<DetectedIssue> {
    let mut issues = Vec::new();
    issues.extend(check_cycle_counters(&snapshot.events));
    issues.extend(check_hour_counters(&snapshot.events));
    issues.extend(check_documentation_gaps(&snapshot.events, now));
    issues.extend(check_release_certificates(
        &snapshot.events,
        &snapshot.documents,
    ));
    issues.extend(check_birth_records(&snapshot.events, &snapshot.documents));
    issues.extend(check_event_sequence(&snapshot.events));
    issues.extend(check_document_staleness(&snapshot.events, now));
    issues.extend(check_facility_certification(&snapshot.events));
    issues
}
