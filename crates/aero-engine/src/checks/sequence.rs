//! Date/sequence consistency check.
//!
//! Two shapes: an event dated before the event preceding it in recorded
//! order, and a second installation with no intervening removal (a
//! component cannot be on two aircraft at once). Both are critical: either
//! the paperwork is wrong or the part history is not this part's.

use aero_core::entities::LifecycleEvent;
use aero_core::enums::{EventType, ExceptionSeverity, ExceptionType};
use aero_core::evidence::{EvidencePayload, SequenceAnomalyKind};

use super::DetectedIssue;

/// Flag out-of-order dates and double installs.
#[must_use]
pub fn check_event_sequence(events: &[LifecycleEvent]) -> Vec<DetectedIssue> {
    let mut issues = Vec::new();

    for pair in events.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.occurred_at < prev.occurred_at {
            issues.push(DetectedIssue {
                exception_type: ExceptionType::DateSequenceError,
                severity: ExceptionSeverity::Critical,
                title: "Event dated before its predecessor".into(),
                description: format!(
                    "{} on {} is recorded after {} on {}",
                    next.event_type,
                    next.occurred_at.date_naive(),
                    prev.event_type,
                    prev.occurred_at.date_naive()
                ),
                evidence: EvidencePayload::SequenceAnomaly {
                    anomaly: SequenceAnomalyKind::OutOfOrderDates,
                    first_event_id: prev.id.clone(),
                    first_date: prev.occurred_at,
                    second_event_id: next.id.clone(),
                    second_date: next.occurred_at,
                },
            });
        }
    }

    let mut open_install: Option<&LifecycleEvent> = None;
    for event in events {
        match event.event_type {
            EventType::Install => {
                if let Some(first) = open_install {
                    issues.push(DetectedIssue {
                        exception_type: ExceptionType::DateSequenceError,
                        severity: ExceptionSeverity::Critical,
                        title: "Installed twice with no removal between".into(),
                        description: format!(
                            "Installed on {} and again on {} without a remove event",
                            first.occurred_at.date_naive(),
                            event.occurred_at.date_naive()
                        ),
                        evidence: EvidencePayload::SequenceAnomaly {
                            anomaly: SequenceAnomalyKind::DoubleInstall,
                            first_event_id: first.id.clone(),
                            first_date: first.occurred_at,
                            second_event_id: event.id.clone(),
                            second_date: event.occurred_at,
                        },
                    });
                }
                open_install = Some(event);
            }
            EventType::Remove => open_install = None,
            _ => {}
        }
    }

    issues
}
