//! Record-keeping checks: release certificates, birth records, and stale
//! draft documents.

use chrono::{DateTime, Utc};

use aero_core::entities::{Document, LifecycleEvent};
use aero_core::enums::{DocumentStatus, DocumentType, EventType, ExceptionSeverity, ExceptionType};
use aero_core::evidence::{BirthRecordKind, EvidencePayload};

use super::DetectedIssue;

/// A generated document left unsigned this long is considered stale.
const STALE_DRAFT_DAYS: i64 = 30;

/// Flag every `release_to_service` event when the component has no
/// 8130-style release certificate, generated or uploaded.
///
/// Deliberately narrow: `repair`, `reassembly`, and `final_inspection` do
/// not trigger this check even though they also commonly end with an
/// 8130-3. Widening it is tracked as a product question.
#[must_use]
pub fn check_release_certificates(
    events: &[LifecycleEvent],
    documents: &[Document],
) -> Vec<DetectedIssue> {
    let has_release_certificate = documents
        .iter()
        .any(|d| d.document_type == DocumentType::ReleaseCertificate)
        || events
            .iter()
            .flat_map(|e| &e.generated_documents)
            .any(|d| d.document_type == DocumentType::ReleaseCertificate);
    if has_release_certificate {
        return Vec::new();
    }

    events
        .iter()
        .filter(|e| e.event_type == EventType::ReleaseToService)
        .map(|e| DetectedIssue {
            exception_type: ExceptionType::MissingReleaseCertificate,
            severity: ExceptionSeverity::Warning,
            title: "Release to service without an 8130-3".into(),
            description: format!(
                "Released to service on {} at {} but no release certificate is on file",
                e.occurred_at.date_naive(),
                e.facility.name
            ),
            evidence: EvidencePayload::MissingReleaseCertificate {
                event_id: e.id.clone(),
                event_date: e.occurred_at,
            },
        })
        .collect()
}

/// Flag a missing `manufacture` event and a missing birth-certificate
/// document as two independent findings.
#[must_use]
pub fn check_birth_records(
    events: &[LifecycleEvent],
    documents: &[Document],
) -> Vec<DetectedIssue> {
    let mut issues = Vec::new();
    if !events.iter().any(|e| e.event_type == EventType::Manufacture) {
        issues.push(DetectedIssue {
            exception_type: ExceptionType::MissingBirthRecord,
            severity: ExceptionSeverity::Warning,
            title: "No manufacture event on record".into(),
            description: "The component's history does not begin with a manufacture event".into(),
            evidence: EvidencePayload::MissingBirthRecord {
                missing: BirthRecordKind::ManufactureEvent,
            },
        });
    }
    if !documents
        .iter()
        .any(|d| d.document_type == DocumentType::BirthCertificate)
    {
        issues.push(DetectedIssue {
            exception_type: ExceptionType::MissingBirthRecord,
            severity: ExceptionSeverity::Warning,
            title: "No birth certificate on file".into(),
            description: "The component has no birth certificate document".into(),
            evidence: EvidencePayload::MissingBirthRecord {
                missing: BirthRecordKind::BirthCertificateDocument,
            },
        });
    }
    issues
}

/// Flag event-attached generated documents still in draft more than
/// [`STALE_DRAFT_DAYS`] after creation.
#[must_use]
pub fn check_document_staleness(
    events: &[LifecycleEvent],
    now: DateTime<Utc>,
) -> Vec<DetectedIssue> {
    let mut issues = Vec::new();
    for event in events {
        for doc in &event.generated_documents {
            if doc.status != DocumentStatus::Draft {
                continue;
            }
            let age_days = (now - doc.created_at).num_days();
            if age_days > STALE_DRAFT_DAYS {
                issues.push(DetectedIssue {
                    exception_type: ExceptionType::StaleDraftDocument,
                    severity: ExceptionSeverity::Info,
                    title: "Generated document never signed".into(),
                    description: format!(
                        "A {} created {} has been in draft for {age_days} days",
                        doc.document_type,
                        doc.created_at.date_naive()
                    ),
                    evidence: EvidencePayload::StaleDraftDocument {
                        event_id: event.id.clone(),
                        document_id: doc.id.clone(),
                        document_type: doc.document_type,
                        created_at: doc.created_at,
                        age_days,
                    },
                });
            }
        }
    }
    issues
}
