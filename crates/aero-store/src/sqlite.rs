//! libSQL-backed component store.
//!
//! Uses the `libsql` crate (C `SQLite` fork) with a local file or
//! `:memory:` database. Snapshot loading assembles the nested object graph
//! (events with evidence, generated documents, and parts consumed) from
//! per-table queries joined on the component id, not an ORM include-tree.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use libsql::Builder;

use aero_core::entities::{
    Alert, Component, ComponentSnapshot, Document, EvidenceItem, Exception, Facility,
    GeneratedDocument, LifecycleEvent, PartConsumed, Performer,
};
use aero_core::enums::ExceptionStatus;
use aero_core::ids::{
    PREFIX_ALERT, PREFIX_COMPONENT, PREFIX_DOCUMENT, PREFIX_EVENT, PREFIX_EVIDENCE,
};

use crate::error::StoreError;
use crate::helpers::{
    get_opt_string, parse_datetime, parse_enum, parse_evidence, parse_optional_datetime,
};
use crate::repo::ComponentStore;

/// Component store backed by a libSQL database.
pub struct LibsqlStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LibsqlStore {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations
    /// fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        tracing::debug!(path, "opening libSQL component store");
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let store = Self { db, conn };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID, e.g. `"cmp-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the
    /// prefix.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, StoreError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("id generation returned no row".into()))?;
        Ok(row.get::<String>(0)?)
    }

    /// Persist a component. Generates an id when the entity carries none.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on constraint violations (duplicate
    /// part/serial pair) or query failure.
    pub async fn insert_component(&self, component: &Component) -> Result<Component, StoreError> {
        let mut stored = component.clone();
        if stored.id.is_empty() {
            stored.id = self.generate_id(PREFIX_COMPONENT).await?;
        }
        self.conn
            .execute(
                "INSERT INTO components (id, part_number, serial_number, description, manufacture_date, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    stored.id.as_str(),
                    stored.part_number.as_str(),
                    stored.serial_number.as_str(),
                    stored.description.as_str(),
                    stored.manufacture_date.to_rfc3339(),
                    stored.status.as_str(),
                    stored.created_at.to_rfc3339(),
                    stored.updated_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(stored)
    }

    /// Persist a lifecycle event with its nested evidence, generated
    /// documents, and parts consumed. Generates ids where missing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the component does not exist (foreign key)
    /// or a query fails.
    pub async fn insert_event(&self, event: &LifecycleEvent) -> Result<LifecycleEvent, StoreError> {
        let mut stored = event.clone();
        if stored.id.is_empty() {
            stored.id = self.generate_id(PREFIX_EVENT).await?;
        }
        self.conn
            .execute(
                "INSERT INTO lifecycle_events (id, component_id, event_type, occurred_at,
                     facility_name, facility_type, facility_certificate,
                     performer_name, performer_certification,
                     hours_at_event, cycles_at_event, aircraft, operator,
                     work_order, cmm_reference, notes, record_hash)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
                libsql::params![
                    stored.id.as_str(),
                    stored.component_id.as_str(),
                    stored.event_type.as_str(),
                    stored.occurred_at.to_rfc3339(),
                    stored.facility.name.as_str(),
                    stored.facility.facility_type.as_str(),
                    stored.facility.certificate_number.as_deref(),
                    stored.performer.name.as_str(),
                    stored.performer.certification.as_deref(),
                    stored.hours_at_event,
                    stored.cycles_at_event.map(i64::from),
                    stored.aircraft.as_deref(),
                    stored.operator.as_deref(),
                    stored.work_order.as_deref(),
                    stored.cmm_reference.as_deref(),
                    stored.notes.as_deref(),
                    stored.record_hash.as_deref()
                ],
            )
            .await?;

        for item in &mut stored.evidence {
            if item.id.is_empty() {
                item.id = self.generate_id(PREFIX_EVIDENCE).await?;
            }
            self.conn
                .execute(
                    "INSERT INTO event_evidence (id, event_id, description, media_type, captured_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    libsql::params![
                        item.id.as_str(),
                        stored.id.as_str(),
                        item.description.as_str(),
                        item.media_type.as_deref(),
                        item.captured_at.to_rfc3339()
                    ],
                )
                .await?;
        }
        for doc in &mut stored.generated_documents {
            if doc.id.is_empty() {
                doc.id = self.generate_id(PREFIX_DOCUMENT).await?;
            }
            self.conn
                .execute(
                    "INSERT INTO event_generated_documents (id, event_id, document_type, status, created_at, signed_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    libsql::params![
                        doc.id.as_str(),
                        stored.id.as_str(),
                        doc.document_type.as_str(),
                        doc.status.as_str(),
                        doc.created_at.to_rfc3339(),
                        doc.signed_at.map(|dt| dt.to_rfc3339())
                    ],
                )
                .await?;
        }
        for part in &stored.parts_consumed {
            self.conn
                .execute(
                    "INSERT INTO event_parts_consumed (event_id, part_number, serial_number, description, quantity)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    libsql::params![
                        stored.id.as_str(),
                        part.part_number.as_str(),
                        part.serial_number.as_deref(),
                        part.description.as_str(),
                        i64::from(part.quantity)
                    ],
                )
                .await?;
        }
        Ok(stored)
    }

    /// Persist a component-level document. Generates an id when missing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on foreign-key or query failure.
    pub async fn insert_document(&self, document: &Document) -> Result<Document, StoreError> {
        let mut stored = document.clone();
        if stored.id.is_empty() {
            stored.id = self.generate_id(PREFIX_DOCUMENT).await?;
        }
        self.conn
            .execute(
                "INSERT INTO documents (id, component_id, document_type, title, source, issued_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    stored.id.as_str(),
                    stored.component_id.as_str(),
                    stored.document_type.as_str(),
                    stored.title.as_str(),
                    stored.source.as_str(),
                    stored.issued_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(stored)
    }

    /// Persist an alert. Generates an id when missing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on foreign-key or query failure.
    pub async fn insert_alert(&self, alert: &Alert) -> Result<Alert, StoreError> {
        let mut stored = alert.clone();
        if stored.id.is_empty() {
            stored.id = self.generate_id(PREFIX_ALERT).await?;
        }
        self.conn
            .execute(
                "INSERT INTO alerts (id, component_id, title, message, created_by, created_at, active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    stored.id.as_str(),
                    stored.component_id.as_str(),
                    stored.title.as_str(),
                    stored.message.as_str(),
                    stored.created_by.as_str(),
                    stored.created_at.to_rfc3339(),
                    i64::from(stored.active)
                ],
            )
            .await?;
        Ok(stored)
    }

    async fn load_exception(&self, exception_id: &str) -> Result<Exception, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, component_id, exception_type, severity, title, description,
                        evidence, status, detected_at, resolved_by, resolved_at, resolution_notes
                 FROM exceptions WHERE id = ?1",
                [exception_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::ExceptionNotFound {
                exception_id: exception_id.to_string(),
            })?;
        row_to_exception(&row)
    }
}

fn row_to_component(row: &libsql::Row) -> Result<Component, StoreError> {
    Ok(Component {
        id: row.get::<String>(0)?,
        part_number: row.get::<String>(1)?,
        serial_number: row.get::<String>(2)?,
        description: row.get::<String>(3)?,
        manufacture_date: parse_datetime(&row.get::<String>(4)?)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

fn row_to_event(row: &libsql::Row) -> Result<LifecycleEvent, StoreError> {
    let cycles_at_event = match row.get::<Option<i64>>(10)? {
        Some(c) => Some(
            u32::try_from(c)
                .map_err(|_| StoreError::Query(format!("cycles_at_event out of range: {c}")))?,
        ),
        None => None,
    };
    Ok(LifecycleEvent {
        id: row.get::<String>(0)?,
        component_id: row.get::<String>(1)?,
        event_type: parse_enum(&row.get::<String>(2)?)?,
        occurred_at: parse_datetime(&row.get::<String>(3)?)?,
        facility: Facility {
            name: row.get::<String>(4)?,
            facility_type: parse_enum(&row.get::<String>(5)?)?,
            certificate_number: get_opt_string(row, 6)?,
        },
        performer: Performer {
            name: row.get::<String>(7)?,
            certification: get_opt_string(row, 8)?,
        },
        hours_at_event: row.get::<Option<f64>>(9)?,
        cycles_at_event,
        aircraft: get_opt_string(row, 11)?,
        operator: get_opt_string(row, 12)?,
        work_order: get_opt_string(row, 13)?,
        cmm_reference: get_opt_string(row, 14)?,
        notes: get_opt_string(row, 15)?,
        record_hash: get_opt_string(row, 16)?,
        evidence: Vec::new(),
        generated_documents: Vec::new(),
        parts_consumed: Vec::new(),
    })
}

fn row_to_document(row: &libsql::Row) -> Result<Document, StoreError> {
    Ok(Document {
        id: row.get::<String>(0)?,
        component_id: row.get::<String>(1)?,
        document_type: parse_enum(&row.get::<String>(2)?)?,
        title: row.get::<String>(3)?,
        source: parse_enum(&row.get::<String>(4)?)?,
        issued_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn row_to_exception(row: &libsql::Row) -> Result<Exception, StoreError> {
    Ok(Exception {
        id: row.get::<String>(0)?,
        component_id: row.get::<String>(1)?,
        exception_type: parse_enum(&row.get::<String>(2)?)?,
        severity: parse_enum(&row.get::<String>(3)?)?,
        title: row.get::<String>(4)?,
        description: row.get::<String>(5)?,
        evidence: parse_evidence(&row.get::<String>(6)?)?,
        status: parse_enum(&row.get::<String>(7)?)?,
        detected_at: parse_datetime(&row.get::<String>(8)?)?,
        resolved_by: get_opt_string(row, 9)?,
        resolved_at: parse_optional_datetime(get_opt_string(row, 10)?.as_deref())?,
        resolution_notes: get_opt_string(row, 11)?,
    })
}

fn row_to_alert(row: &libsql::Row) -> Result<Alert, StoreError> {
    Ok(Alert {
        id: row.get::<String>(0)?,
        component_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        message: row.get::<String>(3)?,
        created_by: row.get::<String>(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        active: row.get::<i64>(6)? != 0,
    })
}

#[async_trait]
impl ComponentStore for LibsqlStore {
    async fn load_component_snapshot(
        &self,
        component_id: &str,
    ) -> Result<ComponentSnapshot, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, part_number, serial_number, description, manufacture_date, status, created_at, updated_at
                 FROM components WHERE id = ?1",
                [component_id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::NotFound {
            component_id: component_id.to_string(),
        })?;
        let component = row_to_component(&row)?;

        let mut events = Vec::new();
        let mut rows = self
            .conn
            .query(
                "SELECT id, component_id, event_type, occurred_at,
                        facility_name, facility_type, facility_certificate,
                        performer_name, performer_certification,
                        hours_at_event, cycles_at_event, aircraft, operator,
                        work_order, cmm_reference, notes, record_hash
                 FROM lifecycle_events WHERE component_id = ?1
                 ORDER BY occurred_at ASC, rowid ASC",
                [component_id],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            events.push(row_to_event(&row)?);
        }

        let mut evidence: HashMap<String, Vec<EvidenceItem>> = HashMap::new();
        let mut rows = self
            .conn
            .query(
                "SELECT ev.id, ev.event_id, ev.description, ev.media_type, ev.captured_at
                 FROM event_evidence ev
                 JOIN lifecycle_events e ON ev.event_id = e.id
                 WHERE e.component_id = ?1
                 ORDER BY ev.captured_at ASC, ev.rowid ASC",
                [component_id],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let event_id = row.get::<String>(1)?;
            evidence.entry(event_id).or_default().push(EvidenceItem {
                id: row.get::<String>(0)?,
                description: row.get::<String>(2)?,
                media_type: get_opt_string(&row, 3)?,
                captured_at: parse_datetime(&row.get::<String>(4)?)?,
            });
        }

        let mut generated: HashMap<String, Vec<GeneratedDocument>> = HashMap::new();
        let mut rows = self
            .conn
            .query(
                "SELECT gd.id, gd.event_id, gd.document_type, gd.status, gd.created_at, gd.signed_at
                 FROM event_generated_documents gd
                 JOIN lifecycle_events e ON gd.event_id = e.id
                 WHERE e.component_id = ?1
                 ORDER BY gd.created_at ASC, gd.rowid ASC",
                [component_id],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let event_id = row.get::<String>(1)?;
            generated.entry(event_id).or_default().push(GeneratedDocument {
                id: row.get::<String>(0)?,
                document_type: parse_enum(&row.get::<String>(2)?)?,
                status: parse_enum(&row.get::<String>(3)?)?,
                created_at: parse_datetime(&row.get::<String>(4)?)?,
                signed_at: parse_optional_datetime(get_opt_string(&row, 5)?.as_deref())?,
            });
        }

        let mut parts: HashMap<String, Vec<PartConsumed>> = HashMap::new();
        let mut rows = self
            .conn
            .query(
                "SELECT pc.event_id, pc.part_number, pc.serial_number, pc.description, pc.quantity
                 FROM event_parts_consumed pc
                 JOIN lifecycle_events e ON pc.event_id = e.id
                 WHERE e.component_id = ?1
                 ORDER BY pc.rowid ASC",
                [component_id],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let event_id = row.get::<String>(0)?;
            let quantity = row.get::<i64>(4)?;
            parts.entry(event_id).or_default().push(PartConsumed {
                part_number: row.get::<String>(1)?,
                serial_number: get_opt_string(&row, 2)?,
                description: row.get::<String>(3)?,
                quantity: u32::try_from(quantity)
                    .map_err(|_| StoreError::Query(format!("quantity out of range: {quantity}")))?,
            });
        }

        for event in &mut events {
            if let Some(items) = evidence.remove(&event.id) {
                event.evidence = items;
            }
            if let Some(docs) = generated.remove(&event.id) {
                event.generated_documents = docs;
            }
            if let Some(consumed) = parts.remove(&event.id) {
                event.parts_consumed = consumed;
            }
        }

        let mut documents = Vec::new();
        let mut rows = self
            .conn
            .query(
                "SELECT id, component_id, document_type, title, source, issued_at
                 FROM documents WHERE component_id = ?1
                 ORDER BY issued_at ASC, rowid ASC",
                [component_id],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            documents.push(row_to_document(&row)?);
        }

        let mut exceptions = Vec::new();
        let mut rows = self
            .conn
            .query(
                "SELECT id, component_id, exception_type, severity, title, description,
                        evidence, status, detected_at, resolved_by, resolved_at, resolution_notes
                 FROM exceptions WHERE component_id = ?1
                 ORDER BY detected_at ASC, rowid ASC",
                [component_id],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            exceptions.push(row_to_exception(&row)?);
        }

        let mut alerts = Vec::new();
        let mut rows = self
            .conn
            .query(
                "SELECT id, component_id, title, message, created_by, created_at, active
                 FROM alerts WHERE component_id = ?1
                 ORDER BY created_at ASC, rowid ASC",
                [component_id],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            alerts.push(row_to_alert(&row)?);
        }

        Ok(ComponentSnapshot {
            component,
            events,
            documents,
            exceptions,
            alerts,
        })
    }

    async fn list_component_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        let mut rows = self
            .conn
            .query("SELECT id FROM components ORDER BY id ASC", ())
            .await?;
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }
        Ok(ids)
    }

    async fn insert_exception(&self, exception: &Exception) -> Result<(), StoreError> {
        let evidence_json = serde_json::to_string(&exception.evidence)
            .map_err(|e| StoreError::Query(format!("Failed to serialize evidence: {e}")))?;
        let evidence_hash = exception
            .evidence
            .canonical_hash()
            .map_err(|e| StoreError::Query(format!("Failed to hash evidence: {e}")))?;
        self.conn
            .execute(
                "INSERT INTO exceptions (id, component_id, exception_type, severity, title, description,
                     evidence, evidence_hash, status, detected_at, resolved_by, resolved_at, resolution_notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                libsql::params![
                    exception.id.as_str(),
                    exception.component_id.as_str(),
                    exception.exception_type.as_str(),
                    exception.severity.as_str(),
                    exception.title.as_str(),
                    exception.description.as_str(),
                    evidence_json.as_str(),
                    evidence_hash.as_str(),
                    exception.status.as_str(),
                    exception.detected_at.to_rfc3339(),
                    exception.resolved_by.as_deref(),
                    exception.resolved_at.map(|dt| dt.to_rfc3339()),
                    exception.resolution_notes.as_deref()
                ],
            )
            .await?;
        Ok(())
    }

    async fn update_exception_status(
        &self,
        exception_id: &str,
        status: ExceptionStatus,
        resolved_by: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Exception, StoreError> {
        let current = self.load_exception(exception_id).await?;
        if !current.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                exception_id: exception_id.to_string(),
                from: current.status,
                to: status,
            });
        }

        if status.is_closed() {
            let now = Utc::now();
            self.conn
                .execute(
                    "UPDATE exceptions
                     SET status = ?1, resolved_by = ?2, resolved_at = ?3, resolution_notes = ?4
                     WHERE id = ?5",
                    libsql::params![
                        status.as_str(),
                        resolved_by,
                        now.to_rfc3339(),
                        notes,
                        exception_id
                    ],
                )
                .await?;
        } else {
            self.conn
                .execute(
                    "UPDATE exceptions SET status = ?1 WHERE id = ?2",
                    libsql::params![status.as_str(), exception_id],
                )
                .await?;
        }

        self.load_exception(exception_id).await
    }
}
