//! Entity structs for all Aerotrace domain objects.
//!
//! Each entity maps to a table in the libSQL store. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and
//! schema validation. A component exclusively owns its events and documents;
//! exceptions are owned by the component but referenced by review workflows.

mod alert;
mod component;
mod document;
mod event;
mod exception;
mod snapshot;

pub use alert::Alert;
pub use component::Component;
pub use document::Document;
pub use event::{EvidenceItem, Facility, GeneratedDocument, LifecycleEvent, PartConsumed, Performer};
pub use exception::Exception;
pub use snapshot::ComponentSnapshot;
