//! Subcommand handlers.

pub mod fleet;
pub mod import;
pub mod scan;
pub mod trace;
