//! Status and type enums for Aerotrace.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! The wire strings are frozen: the reporting/UI layer matches on them, so
//! renaming a variant is a breaking change. `ExceptionStatus` carries a state
//! machine with `allowed_next_states()` enforced at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ComponentStatus
// ---------------------------------------------------------------------------

/// Current lifecycle status of a component. Components are never deleted,
/// only retired or scrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Serviceable,
    InRepair,
    Retired,
    Scrapped,
}

impl ComponentStatus {
    /// Whether the component has reached the end of its life.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Retired | Self::Scrapped)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Serviceable => "serviceable",
            Self::InRepair => "in_repair",
            Self::Retired => "retired",
            Self::Scrapped => "scrapped",
        }
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EventType
// ---------------------------------------------------------------------------

/// One documented fact in a component's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Manufacture,
    Install,
    Remove,
    ReceivingInspection,
    Teardown,
    DetailedInspection,
    Repair,
    Reassembly,
    FunctionalTest,
    FinalInspection,
    ReleaseToService,
    Transfer,
    Retire,
    Scrap,
}

impl EventType {
    /// Events performed while the part is on wing. Time following these is
    /// accounted for by the installation itself, so documentation-gap checks
    /// never flag it.
    #[must_use]
    pub const fn is_in_service(self) -> bool {
        matches!(
            self,
            Self::Install | Self::DetailedInspection | Self::FunctionalTest
        )
    }

    /// Supply-chain events where long quiet periods are normal warehousing
    /// or transit rather than missing paperwork.
    #[must_use]
    pub const fn is_supply_chain(self) -> bool {
        matches!(self, Self::Manufacture | Self::ReleaseToService | Self::Transfer)
    }

    /// Shop-floor maintenance events that must happen at a certificated
    /// facility when performed by an MRO.
    #[must_use]
    pub const fn is_maintenance(self) -> bool {
        matches!(
            self,
            Self::Repair
                | Self::Reassembly
                | Self::ReleaseToService
                | Self::FunctionalTest
                | Self::DetailedInspection
                | Self::Teardown
                | Self::ReceivingInspection
        )
    }

    /// Events that end the component's timeline.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Retire | Self::Scrap)
    }

    /// How many days of shop processing or transit a single touchpoint of
    /// this type reasonably accounts for, on each side of the event date.
    /// `Install` is not windowed: it covers the whole on-wing span up to the
    /// next removal.
    #[must_use]
    pub const fn coverage_window_days(self) -> i64 {
        match self {
            Self::ReceivingInspection | Self::Repair | Self::ReleaseToService | Self::Transfer => {
                14
            }
            _ => 7,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manufacture => "manufacture",
            Self::Install => "install",
            Self::Remove => "remove",
            Self::ReceivingInspection => "receiving_inspection",
            Self::Teardown => "teardown",
            Self::DetailedInspection => "detailed_inspection",
            Self::Repair => "repair",
            Self::Reassembly => "reassembly",
            Self::FunctionalTest => "functional_test",
            Self::FinalInspection => "final_inspection",
            Self::ReleaseToService => "release_to_service",
            Self::Transfer => "transfer",
            Self::Retire => "retire",
            Self::Scrap => "scrap",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FacilityType
// ---------------------------------------------------------------------------

/// Kind of facility an event was performed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FacilityType {
    Manufacturer,
    Mro,
    Operator,
    Distributor,
}

impl FacilityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manufacturer => "manufacturer",
            Self::Mro => "mro",
            Self::Operator => "operator",
            Self::Distributor => "distributor",
        }
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocumentType
// ---------------------------------------------------------------------------

/// Compliance artifact categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    BirthCertificate,
    /// 8130-3 style authorized release certificate.
    ReleaseCertificate,
    WorkOrder,
    TestReport,
    TeardownReport,
    CertificateOfConformance,
}

impl DocumentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BirthCertificate => "birth_certificate",
            Self::ReleaseCertificate => "release_certificate",
            Self::WorkOrder => "work_order",
            Self::TestReport => "test_report",
            Self::TeardownReport => "teardown_report",
            Self::CertificateOfConformance => "certificate_of_conformance",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocumentStatus
// ---------------------------------------------------------------------------

/// Signature state of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Signed,
    Superseded,
}

impl DocumentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Signed => "signed",
            Self::Superseded => "superseded",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocumentSource
// ---------------------------------------------------------------------------

/// Whether a component-level document was produced by the system or uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSource {
    Generated,
    Uploaded,
}

impl DocumentSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Uploaded => "uploaded",
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ExceptionType
// ---------------------------------------------------------------------------

/// The fixed enumeration of detectable integrity issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionType {
    CycleCountDiscrepancy,
    ImplausibleCycleRate,
    FlightHoursDiscrepancy,
    ImplausibleHoursRate,
    DocumentationGap,
    MissingReleaseCertificate,
    MissingBirthRecord,
    DateSequenceError,
    StaleDraftDocument,
    UncertifiedFacility,
}

impl ExceptionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CycleCountDiscrepancy => "cycle_count_discrepancy",
            Self::ImplausibleCycleRate => "implausible_cycle_rate",
            Self::FlightHoursDiscrepancy => "flight_hours_discrepancy",
            Self::ImplausibleHoursRate => "implausible_hours_rate",
            Self::DocumentationGap => "documentation_gap",
            Self::MissingReleaseCertificate => "missing_release_certificate",
            Self::MissingBirthRecord => "missing_birth_record",
            Self::DateSequenceError => "date_sequence_error",
            Self::StaleDraftDocument => "stale_draft_document",
            Self::UncertifiedFacility => "uncertified_facility",
        }
    }
}

impl fmt::Display for ExceptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ExceptionSeverity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionSeverity {
    Critical,
    Warning,
    Info,
}

impl ExceptionSeverity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ExceptionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ExceptionStatus
// ---------------------------------------------------------------------------

/// Review status of a detected exception.
///
/// ```text
/// open → investigating → resolved
///      ↘ resolved            ↘ false_positive
///      ↘ false_positive
/// ```
///
/// Terminal states have no successors; a resolved or false-positive
/// exception is never reopened; a fresh scan records a new one instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionStatus {
    Open,
    Investigating,
    Resolved,
    FalsePositive,
}

impl ExceptionStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Open => &[Self::Investigating, Self::Resolved, Self::FalsePositive],
            Self::Investigating => &[Self::Resolved, Self::FalsePositive],
            Self::Resolved | Self::FalsePositive => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// States that no longer count against the component when deduplicating
    /// freshly detected issues.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Resolved | Self::FalsePositive)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
            Self::FalsePositive => "false_positive",
        }
    }
}

impl fmt::Display for ExceptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GapSeverity
// ---------------------------------------------------------------------------

/// Severity of an unexplained time gap in the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    Critical,
    Warning,
    Minor,
}

impl GapSeverity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Minor => "minor",
        }
    }
}

impl fmt::Display for GapSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TraceRating
// ---------------------------------------------------------------------------

/// Qualitative rating derived from the trace completeness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TraceRating {
    Complete,
    Good,
    Fair,
    Poor,
}

impl TraceRating {
    /// Map a 0..=100 completeness score to its rating band.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score > 95 {
            Self::Complete
        } else if score >= 80 {
            Self::Good
        } else if score >= 60 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for TraceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
