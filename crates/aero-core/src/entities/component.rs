use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ComponentStatus;

/// A serialized aerospace part under lifecycle tracking.
///
/// Created once at manufacture or ingestion; status is mutated by event
/// processing and never deleted, only retired or scrapped.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Component {
    pub id: String,
    pub part_number: String,
    pub serial_number: String,
    pub description: String,
    pub manufacture_date: DateTime<Utc>,
    pub status: ComponentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
