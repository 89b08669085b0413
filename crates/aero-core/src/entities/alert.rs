use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A manually curated flag on a component. Not engine output: consumed as
/// sibling data in reporting alongside exceptions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Alert {
    pub id: String,
    pub component_id: String,
    pub title: String,
    pub message: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}
