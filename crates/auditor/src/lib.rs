//! Bundle library auditor.
//!
//! Walks a macOS `.app` bundle, lists the libraries each file links against
//! and reports references that are neither system libraries nor bundled.

pub mod allowlist;
pub mod audit;
pub mod classify;
pub mod lister;
pub mod parsers;
pub mod report;
pub mod walk;

pub use allowlist::Allowlist;
pub use audit::{AuditConfig, Auditor, OutputFormat};
pub use lister::{DependencyLister, Otool};
pub use report::{AuditReport, FileReport, Violation, ViolationKind};
