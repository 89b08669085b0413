//! # aero-core
//!
//! Core types, ID generation prefixes, and error types for Aerotrace.
//!
//! This crate provides the foundational types shared across all Aerotrace
//! crates:
//! - Entity structs for all domain objects (components, lifecycle events,
//!   documents, exceptions, alerts)
//! - Status and type enums with snake_case wire strings frozen for interop
//!   with the reporting layer
//! - The tagged evidence payload union and its canonical dedup hash
//! - Clock abstraction so engines never read wall-clock time implicitly
//! - ID prefix constants
//! - Cross-cutting error types

pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod evidence;
pub mod ids;
