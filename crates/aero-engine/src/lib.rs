//! # aero-engine
//!
//! The two analytical engines of Aerotrace.
//!
//! - [`ScanEngine`] runs eight independent, pure check functions against a
//!   fully loaded component snapshot, deduplicates findings against
//!   previously recorded non-closed exceptions by canonical evidence hash,
//!   persists new ones, and returns an aggregate summary. A fleet variant
//!   fans scans out across all components and isolates per-component
//!   failures.
//! - [`trace::calculate_trace_completeness`] is a pure function scoring how
//!   completely a component's life is accounted for in documentation, with
//!   unexplained-gap detection and a qualitative rating.
//!
//! Both engines take "now" from an injected [`aero_core::clock::Clock`].

pub mod checks;
mod error;
mod fleet;
mod scan;
pub mod trace;

#[cfg(test)]
pub(crate) mod test_support;

pub use checks::DetectedIssue;
pub use error::EngineError;
pub use fleet::{FleetFailure, FleetSummary, SeverityCounts};
pub use scan::{ScanEngine, ScanOutcome, ScanSummary};
pub use trace::{TraceGap, TraceReport, calculate_trace_completeness, format_duration};
