use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Alert, Component, Document, Exception, LifecycleEvent};

/// A fully loaded component: the unit of work for both engines.
///
/// Stores guarantee `events` is sorted ascending by `occurred_at`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComponentSnapshot {
    pub component: Component,
    pub events: Vec<LifecycleEvent>,
    pub documents: Vec<Document>,
    pub exceptions: Vec<Exception>,
    pub alerts: Vec<Alert>,
}
