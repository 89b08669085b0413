//! The repository interface the engines depend on.

use aero_core::entities::{ComponentSnapshot, Exception};
use aero_core::enums::ExceptionStatus;
use async_trait::async_trait;

use crate::error::StoreError;

/// Read/write contract between the engines and the event/document store.
#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// Load a component with its events (sorted ascending by `occurred_at`,
    /// each with nested evidence, generated documents, and parts consumed),
    /// its documents, its existing exceptions, and its alerts.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the component does not exist.
    async fn load_component_snapshot(
        &self,
        component_id: &str,
    ) -> Result<ComponentSnapshot, StoreError>;

    /// All component ids, for fleet scans.
    async fn list_component_ids(&self) -> Result<Vec<String>, StoreError>;

    /// Persist one newly detected exception.
    async fn insert_exception(&self, exception: &Exception) -> Result<(), StoreError>;

    /// Human-review write: move an exception through its status state
    /// machine, stamping resolution metadata when it enters a closed state.
    ///
    /// # Errors
    ///
    /// `StoreError::ExceptionNotFound` if the id is unknown;
    /// `StoreError::InvalidTransition` if the state machine forbids the move.
    async fn update_exception_status(
        &self,
        exception_id: &str,
        status: ExceptionStatus,
        resolved_by: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Exception, StoreError>;
}

#[async_trait]
impl<T> ComponentStore for std::sync::Arc<T>
where
    T: ComponentStore + ?Sized,
{
    async fn load_component_snapshot(
        &self,
        component_id: &str,
    ) -> Result<ComponentSnapshot, StoreError> {
        (**self).load_component_snapshot(component_id).await
    }

    async fn list_component_ids(&self) -> Result<Vec<String>, StoreError> {
        (**self).list_component_ids().await
    }

    async fn insert_exception(&self, exception: &Exception) -> Result<(), StoreError> {
        (**self).insert_exception(exception).await
    }

    async fn update_exception_status(
        &self,
        exception_id: &str,
        status: ExceptionStatus,
        resolved_by: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Exception, StoreError> {
        (**self)
            .update_exception_status(exception_id, status, resolved_by, notes)
            .await
    }
}
