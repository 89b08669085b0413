//! Hour/cycle counter checks: monotonicity and rate plausibility.

use aero_core::entities::LifecycleEvent;
use aero_core::enums::{ExceptionSeverity, ExceptionType};
use aero_core::evidence::EvidencePayload;

use super::DetectedIssue;

/// A component cannot realistically accumulate more cycles per day.
const MAX_CYCLES_PER_DAY: f64 = 20.0;

/// A component cannot realistically accumulate more flight hours per day.
const MAX_HOURS_PER_DAY: f64 = 18.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Flag cycle counters that decrease between consecutive counter-bearing
/// events (critical) or increase implausibly fast (warning).
#[must_use]
pub fn check_cycle_counters(events: &[LifecycleEvent]) -> Vec<DetectedIssue> {
    let mut issues = Vec::new();
    let with_counters: Vec<&LifecycleEvent> = events
        .iter()
        .filter(|e| e.cycles_at_event.is_some())
        .collect();

    for pair in with_counters.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let (Some(prev_cycles), Some(next_cycles)) = (prev.cycles_at_event, next.cycles_at_event)
        else {
            continue;
        };

        if next_cycles < prev_cycles {
            issues.push(DetectedIssue {
                exception_type: ExceptionType::CycleCountDiscrepancy,
                severity: ExceptionSeverity::Critical,
                title: "Cycle count decreased between events".into(),
                description: format!(
                    "Recorded cycles fell from {prev_cycles} to {next_cycles} between {} and {}",
                    prev.occurred_at.date_naive(),
                    next.occurred_at.date_naive()
                ),
                evidence: EvidencePayload::CycleRegression {
                    prev_event_id: prev.id.clone(),
                    next_event_id: next.id.clone(),
                    prev_date: prev.occurred_at,
                    next_date: next.occurred_at,
                    prev_cycles,
                    next_cycles,
                },
            });
        } else if next_cycles > prev_cycles {
            let elapsed_days = (next.occurred_at - prev.occurred_at).num_days();
            if elapsed_days < 1 {
                continue;
            }
            let delta_cycles = next_cycles - prev_cycles;
            let per_day = f64::from(delta_cycles) / elapsed_days as f64;
            if per_day > MAX_CYCLES_PER_DAY {
                issues.push(DetectedIssue {
                    exception_type: ExceptionType::ImplausibleCycleRate,
                    severity: ExceptionSeverity::Warning,
                    title: "Implausible cycle accumulation rate".into(),
                    description: format!(
                        "{delta_cycles} cycles over {elapsed_days} days ({} per day) between {} and {}",
                        round2(per_day),
                        prev.occurred_at.date_naive(),
                        next.occurred_at.date_naive()
                    ),
                    evidence: EvidencePayload::CycleRate {
                        prev_event_id: prev.id.clone(),
                        next_event_id: next.id.clone(),
                        prev_date: prev.occurred_at,
                        next_date: next.occurred_at,
                        delta_cycles,
                        elapsed_days,
                        per_day: round2(per_day),
                    },
                });
            }
        }
    }
    issues
}

/// Same shape as the cycle check, over flight-hours counters.
#[must_use]
pub fn check_hour_counters(events: &[LifecycleEvent]) -> Vec<DetectedIssue> {
    let mut issues = Vec::new();
    let with_counters: Vec<&LifecycleEvent> = events
        .iter()
        .filter(|e| e.hours_at_event.is_some())
        .collect();

    for pair in with_counters.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let (Some(prev_hours), Some(next_hours)) = (prev.hours_at_event, next.hours_at_event)
        else {
            continue;
        };

        if next_hours < prev_hours {
            issues.push(DetectedIssue {
                exception_type: ExceptionType::FlightHoursDiscrepancy,
                severity: ExceptionSeverity::Critical,
                title: "Flight hours decreased between events".into(),
                description: format!(
                    "Recorded hours fell from {prev_hours} to {next_hours} between {} and {}",
                    prev.occurred_at.date_naive(),
                    next.occurred_at.date_naive()
                ),
                evidence: EvidencePayload::HoursRegression {
                    prev_event_id: prev.id.clone(),
                    next_event_id: next.id.clone(),
                    prev_date: prev.occurred_at,
                    next_date: next.occurred_at,
                    prev_hours,
                    next_hours,
                },
            });
        } else if next_hours > prev_hours {
            let elapsed_days = (next.occurred_at - prev.occurred_at).num_days();
            if elapsed_days < 1 {
                continue;
            }
            let delta_hours = round2(next_hours - prev_hours);
            let per_day = (next_hours - prev_hours) / elapsed_days as f64;
            if per_day > MAX_HOURS_PER_DAY {
                issues.push(DetectedIssue {
                    exception_type: ExceptionType::ImplausibleHoursRate,
                    severity: ExceptionSeverity::Warning,
                    title: "Implausible flight-hour accumulation rate".into(),
                    description: format!(
                        "{delta_hours} hours over {elapsed_days} days ({} per day) between {} and {}",
                        round2(per_day),
                        prev.occurred_at.date_naive(),
                        next.occurred_at.date_naive()
                    ),
                    evidence: EvidencePayload::HoursRate {
                        prev_event_id: prev.id.clone(),
                        next_event_id: next.id.clone(),
                        prev_date: prev.occurred_at,
                        next_date: next.occurred_at,
                        delta_hours,
                        elapsed_days,
                        per_day: round2(per_day),
                    },
                });
            }
        }
    }
    issues
}
