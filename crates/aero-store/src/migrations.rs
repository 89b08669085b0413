//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent
//! re-running.

use crate::error::StoreError;
use crate::sqlite::LibsqlStore;

/// Initial schema: 8 tables, 9 indexes, including the partial unique index
/// that enforces the exception dedup key for non-closed statuses.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl LibsqlStore {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn()
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| StoreError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
