//! Engine error types.

use aero_store::StoreError;
use thiserror::Error;

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The scanned component does not exist in the store.
    #[error("Component not found: {component_id}")]
    ComponentNotFound { component_id: String },

    /// An evidence payload could not be serialized for hashing.
    #[error("Evidence serialization failed: {0}")]
    Evidence(#[from] serde_json::Error),

    /// Underlying store failure other than a missing component.
    #[error(transparent)]
    Store(#[from] StoreError),
}
