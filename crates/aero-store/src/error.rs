//! Store error types.

use aero_core::enums::ExceptionStatus;
use thiserror::Error;

/// Errors from component store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Component lookup returned no result.
    #[error("Component not found: {component_id}")]
    NotFound { component_id: String },

    /// Exception lookup returned no result.
    #[error("Exception not found: {exception_id}")]
    ExceptionNotFound { exception_id: String },

    /// A review transition was attempted that the status state machine
    /// does not allow.
    #[error("Invalid status transition for exception {exception_id}: {from} -> {to}")]
    InvalidTransition {
        exception_id: String,
        from: ExceptionStatus,
        to: ExceptionStatus,
    },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
