//! Facility certification check.

use aero_core::entities::LifecycleEvent;
use aero_core::enums::{ExceptionSeverity, ExceptionType, FacilityType};
use aero_core::evidence::EvidencePayload;

use super::DetectedIssue;

/// Flag maintenance events performed at an MRO with no facility
/// certificate number recorded.
#[must_use]
pub fn check_facility_certification(events: &[LifecycleEvent]) -> Vec<DetectedIssue> {
    events
        .iter()
        .filter(|e| {
            e.event_type.is_maintenance()
                && e.facility.facility_type == FacilityType::Mro
                && e.facility
                    .certificate_number
                    .as_deref()
                    .is_none_or(str::is_empty)
        })
        .map(|e| DetectedIssue {
            exception_type: ExceptionType::UncertifiedFacility,
            severity: ExceptionSeverity::Warning,
            title: "Maintenance at MRO without certificate on record".into(),
            description: format!(
                "{} performed at {} on {} with no repair-station certificate number",
                e.event_type,
                e.facility.name,
                e.occurred_at.date_naive()
            ),
            evidence: EvidencePayload::UncertifiedFacility {
                event_id: e.id.clone(),
                event_type: e.event_type,
                event_date: e.occurred_at,
                facility_name: e.facility.name.clone(),
            },
        })
        .collect()
}
