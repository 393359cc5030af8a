//! GitHub access and report orchestration for orgaudit.
//!
//! # Architecture
//!
//! - [`client`]: authenticated blocking HTTP client
//! - [`pagination`]: paged listings with rate-limit backoff
//! - [`orgs`], [`repos`], [`collaborators`]: the three listings
//! - [`email`]: best-effort email resolution
//! - [`audit`]: the nested run that streams report rows
//!
//! # Examples
//!
//! ```no_run
//! use orgaudit_core::{AuditConfig, CsvReportWriter};
//! use orgaudit_github::{AuthContext, Auditor, GitHubClient, TracingObserver};
//! use std::path::Path;
//!
//! # fn main() -> orgaudit_core::Result<()> {
//! let config = AuditConfig::default();
//! let client = GitHubClient::new(AuthContext::new("ghp_example")?, &config)?;
//! let auditor = Auditor::new(&client, &config)?;
//!
//! let mut sink = CsvReportWriter::create(Path::new("github_org_report.csv"))?;
//! let summary = auditor.run(&["acme".to_string()], &mut sink, &mut TracingObserver)?;
//! println!("{} rows", summary.rows);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod client;
pub mod collaborators;
pub mod email;
pub mod models;
pub mod orgs;
pub mod pagination;
pub mod rate_limit;
pub mod repos;
pub mod retry;
pub mod sleep;
pub mod url;

// Re-exports for convenient access
pub use audit::{AuditObserver, AuditSummary, Auditor, FetchScope, TracingObserver};
pub use client::{ApiResponse, AuthContext, GitHubClient};
pub use email::{EmailResolver, MaskedEmailFilter};
pub use pagination::{FetchFailure, FetchOutcome, Page, PaginatedFetcher};
pub use rate_limit::{RateLimitPolicy, RateLimitState};
pub use sleep::{RecordingSleeper, Sleeper, ThreadSleeper};
