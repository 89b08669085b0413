//! Documentation-gap check.
//!
//! A part may legitimately fly for years between touches, so gaps after
//! in-service events are never flagged. Gaps after off-aircraft events are
//! flagged past a threshold that is generous for supply-chain events
//! (warehousing and transit are slow) and tight for shop events.

use chrono::{DateTime, Utc};

use aero_core::entities::LifecycleEvent;
use aero_core::enums::{ExceptionSeverity, ExceptionType};
use aero_core::evidence::EvidencePayload;

use super::DetectedIssue;
use crate::trace::format_duration;

/// Allowed quiet period after a supply-chain event (manufacture, release,
/// transfer).
const SUPPLY_CHAIN_GAP_DAYS: i64 = 450;

/// Allowed quiet period after any other off-aircraft event.
const DEFAULT_GAP_DAYS: i64 = 30;

/// Gaps longer than this escalate from warning to critical.
const CRITICAL_GAP_DAYS: i64 = 365;

/// Flag undocumented stretches between events, and between the last event
/// and `now`. Terminal events end the timeline and produce no trailing gap.
#[must_use]
pub fn check_documentation_gaps(
    events: &[LifecycleEvent],
    now: DateTime<Utc>,
) -> Vec<DetectedIssue> {
    let mut issues = Vec::new();
    for pair in events.windows(2) {
        if let Some(issue) = gap_after(&pair[0], Some(&pair[1]), pair[1].occurred_at) {
            issues.push(issue);
        }
    }
    if let Some(last) = events.last() {
        if !last.event_type.is_terminal() {
            if let Some(issue) = gap_after(last, None, now) {
                issues.push(issue);
            }
        }
    }
    issues
}

fn gap_after(
    prev: &LifecycleEvent,
    next: Option<&LifecycleEvent>,
    next_date: DateTime<Utc>,
) -> Option<DetectedIssue> {
    if prev.event_type.is_in_service() {
        return None;
    }
    let gap_days = (next_date - prev.occurred_at).num_days();
    let threshold = if prev.event_type.is_supply_chain() {
        SUPPLY_CHAIN_GAP_DAYS
    } else {
        DEFAULT_GAP_DAYS
    };
    if gap_days <= threshold {
        return None;
    }

    let severity = if gap_days > CRITICAL_GAP_DAYS {
        ExceptionSeverity::Critical
    } else {
        ExceptionSeverity::Warning
    };
    let until = next.map_or_else(
        || "the present".to_string(),
        |n| format!("{} on {}", n.event_type, n.occurred_at.date_naive()),
    );
    Some(DetectedIssue {
        exception_type: ExceptionType::DocumentationGap,
        severity,
        title: "Undocumented period in component history".into(),
        description: format!(
            "{} with no documentation after {} at {} on {} until {until}",
            format_duration(gap_days),
            prev.event_type,
            prev.facility.name,
            prev.occurred_at.date_naive()
        ),
        evidence: EvidencePayload::DocumentationGap {
            prev_event_id: prev.id.clone(),
            prev_event_type: prev.event_type,
            prev_date: prev.occurred_at,
            next_event_id: next.map(|n| n.id.clone()),
            next_event_type: next.map(|n| n.event_type),
            next_date,
            gap_days,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, event};
    use aero_core::enums::EventType;
    use pretty_assertions::assert_eq;

    #[test]
    fn gap_after_install_is_never_flagged() {
        let events = vec![
            event("evt-1", EventType::Install, date(2022, 1, 1)),
            event("evt-2", EventType::DetailedInspection, date(2023, 2, 5)),
        ];
        // 400 days on wing: fine.
        let issues = check_documentation_gaps(&events, date(2023, 2, 6));
        assert!(issues.is_empty());
    }

    #[test]
    fn long_gap_after_remove_is_critical() {
        let events = vec![
            event("evt-1", EventType::Remove, date(2022, 1, 1)),
            event("evt-2", EventType::ReceivingInspection, date(2023, 2, 5)),
        ];
        // 400 days off aircraft with no paperwork.
        let issues = check_documentation_gaps(&events, date(2023, 2, 6));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, ExceptionSeverity::Critical);
        assert_eq!(issues[0].exception_type, ExceptionType::DocumentationGap);
        let EvidencePayload::DocumentationGap { gap_days, .. } = &issues[0].evidence else {
            panic!("wrong evidence shape");
        };
        assert_eq!(*gap_days, 400);
    }

    #[test]
    fn moderate_gap_after_remove_is_warning() {
        let events = vec![
            event("evt-1", EventType::Remove, date(2023, 1, 1)),
            event("evt-2", EventType::Repair, date(2023, 4, 11)),
        ];
        // 100 days: over the 30-day shop threshold, under the critical line.
        let issues = check_documentation_gaps(&events, date(2023, 4, 12));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, ExceptionSeverity::Warning);
    }

    #[test]
    fn supply_chain_threshold_is_generous() {
        let events = vec![
            event("evt-1", EventType::Manufacture, date(2022, 1, 1)),
            event("evt-2", EventType::ReceivingInspection, date(2023, 2, 5)),
        ];
        // 400 days in the supply chain is normal warehousing.
        assert!(check_documentation_gaps(&events, date(2023, 2, 6)).is_empty());

        let events = vec![
            event("evt-1", EventType::Manufacture, date(2022, 1, 1)),
            event("evt-2", EventType::ReceivingInspection, date(2023, 6, 15)),
        ];
        // 530 days exceeds even the supply-chain allowance, and > 365 days
        // makes it critical.
        let issues = check_documentation_gaps(&events, date(2023, 6, 16));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, ExceptionSeverity::Critical);
    }

    #[test]
    fn trailing_gap_to_now_is_flagged() {
        let events = vec![event("evt-1", EventType::Remove, date(2024, 1, 1))];
        let issues = check_documentation_gaps(&events, date(2024, 2, 15));
        assert_eq!(issues.len(), 1);
        let EvidencePayload::DocumentationGap {
            next_event_id,
            gap_days,
            ..
        } = &issues[0].evidence
        else {
            panic!("wrong evidence shape");
        };
        assert_eq!(*next_event_id, None);
        assert_eq!(*gap_days, 45);
    }

    #[test]
    fn no_trailing_gap_after_terminal_event() {
        let events = vec![event("evt-1", EventType::Scrap, date(2020, 1, 1))];
        assert!(check_documentation_gaps(&events, date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn no_trailing_gap_while_installed() {
        let events = vec![event("evt-1", EventType::Install, date(2020, 1, 1))];
        assert!(check_documentation_gaps(&events, date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn short_shop_turnaround_is_fine() {
        let events = vec![
            event("evt-1", EventType::Remove, date(2023, 1, 1)),
            event("evt-2", EventType::ReceivingInspection, date(2023, 1, 20)),
        ];
        assert!(check_documentation_gaps(&events, date(2023, 1, 21)).is_empty());
    }
}
