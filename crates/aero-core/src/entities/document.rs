use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DocumentSource, DocumentType};

/// A compliance artifact associated with a component, independent of any
/// single event (birth certificate, 8130-3 release certificate, etc.).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Document {
    pub id: String,
    pub component_id: String,
    pub document_type: DocumentType,
    pub title: String,
    pub source: DocumentSource,
    pub issued_at: DateTime<Utc>,
}
