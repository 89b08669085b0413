//! Trace completeness calculator.
//!
//! Pure functions scoring how completely a component's life is accounted
//! for in documentation. Each documented event "covers" a window of
//! calendar days around itself; an installation covers the whole on-wing
//! span up to the next removal. The score is the covered share of the
//! component's life in whole days.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use aero_core::entities::{Document, LifecycleEvent};
use aero_core::enums::{EventType, GapSeverity, TraceRating};

/// Pairwise event spacings beyond this are recorded as gaps.
const GAP_THRESHOLD_DAYS: i64 = 30;

/// An unexplained stretch between two documented events.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TraceGap {
    pub from_event_id: String,
    pub from_event_type: EventType,
    pub from_date: DateTime<Utc>,
    pub from_facility: String,
    pub to_event_id: String,
    pub to_event_type: EventType,
    pub to_date: DateTime<Utc>,
    pub to_facility: String,
    pub gap_days: i64,
    pub severity: GapSeverity,
}

/// Result of a completeness calculation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TraceReport {
    /// 0..=100 share of the component's life covered by documentation.
    pub score: u8,
    pub documented_days: u64,
    pub total_days: i64,
    pub gap_count: usize,
    pub total_gap_days: i64,
    pub rating: TraceRating,
    pub gaps: Vec<TraceGap>,
    pub total_events: usize,
    pub total_documents: usize,
}

impl TraceReport {
    fn zeroed(total_documents: usize) -> Self {
        Self {
            score: 0,
            documented_days: 0,
            total_days: 0,
            gap_count: 0,
            total_gap_days: 0,
            rating: TraceRating::Poor,
            gaps: Vec::new(),
            total_events: 0,
            total_documents,
        }
    }
}

/// Score a component's documentation coverage.
///
/// `events` must be sorted ascending by `occurred_at` (the store contract).
/// `retired_date` bounds the accounted life for retired/scrapped
/// components; otherwise the life runs to `now`. With no events at all the
/// result is the defined zero case; no date arithmetic is attempted.
#[must_use]
pub fn calculate_trace_completeness(
    manufacture_date: DateTime<Utc>,
    events: &[LifecycleEvent],
    documents: &[Document],
    retired_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> TraceReport {
    if events.is_empty() {
        return TraceReport::zeroed(documents.len());
    }

    let end = retired_date.unwrap_or(now);
    let total_days = (end - manufacture_date).num_days().max(1);

    // Day-offsets from the manufacture date considered accounted for.
    // Windows are capped at total_days on the high side only; an event on
    // the manufacture day still contributes its full backward half-window
    // to the documented count.
    let mut covered: BTreeSet<i64> = BTreeSet::new();
    for (idx, event) in events.iter().enumerate() {
        let offset = (event.occurred_at - manufacture_date).num_days();
        if event.event_type == EventType::Install {
            let end_offset = events[idx + 1..]
                .iter()
                .find(|e| e.event_type == EventType::Remove)
                .map_or(total_days, |r| (r.occurred_at - manufacture_date).num_days());
            covered.extend(offset..=end_offset.min(total_days));
        } else {
            let window = event.event_type.coverage_window_days();
            covered.extend(offset - window..=(offset + window).min(total_days));
        }
    }

    let documented_days = covered.len() as u64;
    let score = ((documented_days as f64 / total_days as f64) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8;

    let mut gaps = Vec::new();
    for pair in events.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        // Installation coverage already accounts for the on-wing span.
        if prev.event_type == EventType::Install {
            continue;
        }
        let gap_days = (next.occurred_at - prev.occurred_at).num_days();
        if gap_days > GAP_THRESHOLD_DAYS {
            let severity = if gap_days > 180 {
                GapSeverity::Critical
            } else if gap_days > 90 {
                GapSeverity::Warning
            } else {
                GapSeverity::Minor
            };
            gaps.push(TraceGap {
                from_event_id: prev.id.clone(),
                from_event_type: prev.event_type,
                from_date: prev.occurred_at,
                from_facility: prev.facility.name.clone(),
                to_event_id: next.id.clone(),
                to_event_type: next.event_type,
                to_date: next.occurred_at,
                to_facility: next.facility.name.clone(),
                gap_days,
                severity,
            });
        }
    }

    TraceReport {
        score,
        documented_days,
        total_days,
        gap_count: gaps.len(),
        total_gap_days: gaps.iter().map(|g| g.gap_days).sum(),
        rating: TraceRating::from_score(score),
        gaps,
        total_events: events.len(),
        total_documents: documents.len(),
    }
}

/// Render a day count using 30-day months and 12-month years.
///
/// `30` is exactly "1 month"; remainders drop one unit of precision per
/// scale ("1 year, 1 month", never "1 year, 1 month, 5 days").
#[must_use]
pub fn format_duration(days: i64) -> String {
    let days = days.max(0);
    if days < 30 {
        return plural(days, "day");
    }
    let months = days / 30;
    let rem_days = days % 30;
    if months < 12 {
        if rem_days == 0 {
            plural(months, "month")
        } else {
            format!("{}, {}", plural(months, "month"), plural(rem_days, "day"))
        }
    } else {
        let years = months / 12;
        let rem_months = months % 12;
        if rem_months == 0 {
            plural(years, "year")
        } else {
            format!("{}, {}", plural(years, "year"), plural(rem_months, "month"))
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
