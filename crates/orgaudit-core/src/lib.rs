// Core modules
pub mod config;
pub mod error;
pub mod model;
pub mod permission;
pub mod report;

// Re-export commonly used types
pub use config::AuditConfig;
pub use error::{AuditError, Result};
pub use model::{Collaborator, Organization, Repository};
pub use permission::{CapabilityFlags, PermissionLevel, classify};
pub use report::{CsvReportWriter, Email, ReportRow, ReportSink};
