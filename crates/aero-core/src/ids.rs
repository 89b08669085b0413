//! ID prefix constants.
//!
//! Every entity id is `"<prefix>-<hex>"`. Prefixes are three letters so ids
//! stay recognizable in logs and reports.

pub const PREFIX_COMPONENT: &str = "cmp";
pub const PREFIX_EVENT: &str = "evt";
pub const PREFIX_EVIDENCE: &str = "evd";
pub const PREFIX_DOCUMENT: &str = "doc";
pub const PREFIX_EXCEPTION: &str = "exc";
pub const PREFIX_ALERT: &str = "alr";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_COMPONENT,
    PREFIX_EVENT,
    PREFIX_EVIDENCE,
    PREFIX_DOCUMENT,
    PREFIX_EXCEPTION,
    PREFIX_ALERT,
];
