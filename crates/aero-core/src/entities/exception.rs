use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ExceptionSeverity, ExceptionStatus, ExceptionType};
use crate::evidence::EvidencePayload;

/// A detected integrity issue.
///
/// Created by a scan when a check fires and no equivalent non-closed
/// exception already exists; mutated only by explicit human review (status
/// transitions); never silently deleted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Exception {
    pub id: String,
    pub component_id: String,
    pub exception_type: ExceptionType,
    pub severity: ExceptionSeverity,
    pub title: String,
    pub description: String,
    /// Structured identification of exactly which records triggered the
    /// finding. The canonical hash of this payload is the dedup key.
    pub evidence: EvidencePayload,
    pub status: ExceptionStatus,
    pub detected_at: DateTime<Utc>,
    pub resolved_by: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution_notes: Option<String>,
}
