//! Report orchestration
//!
//! ```text
//! resolve_organizations()
//!     ↓ for each organization
//! list_repositories()
//!     ↓ for each repository
//! list_collaborators()
//!     ↓ for each collaborator
//! classify() + EmailResolver::resolve()
//!     ↓
//! ReportSink::write_row()
//! ```
//!
//! Rows are written as soon as they are built, in upstream order. A listing
//! that fails with a non-200 status only loses its own scope: the run moves
//! on to the next organization or repository.

use crate::client::GitHubClient;
use crate::collaborators::list_collaborators;
use crate::email::{EmailResolver, MaskedEmailFilter};
use crate::orgs::resolve_organizations;
use crate::pagination::{FetchFailure, PaginatedFetcher};
use crate::repos::list_repositories;
use orgaudit_core::config::AuditConfig;
use orgaudit_core::{Organization, ReportRow, ReportSink, Repository, Result};

/// Which listing a fetch failure belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchScope {
    Organizations,
    Repositories { organization: String },
    Collaborators { organization: String, repository: String },
}

/// Totals for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub organizations: usize,
    pub repositories: usize,
    pub rows: usize,
    pub emails_found: usize,
    pub failures: usize,
}

/// Receives progress notifications during a run
///
/// Every method defaults to doing nothing.
pub trait AuditObserver {
    fn organizations_resolved(&mut self, _organizations: &[Organization]) {}
    fn organization_started(&mut self, _organization: &Organization) {}
    fn repositories_found(&mut self, _organization: &Organization, _count: usize) {}
    fn repository_started(&mut self, _repository: &Repository) {}
    fn collaborators_added(&mut self, _repository: &Repository, _count: usize) {}
    fn fetch_failed(&mut self, _scope: &FetchScope, _failure: &FetchFailure) {}
    fn finished(&mut self, _summary: &AuditSummary) {}
}

/// Reports progress through `tracing`
#[derive(Debug, Default)]
pub struct TracingObserver;

impl AuditObserver for TracingObserver {
    fn organizations_resolved(&mut self, organizations: &[Organization]) {
        let logins: Vec<&str> = organizations.iter().map(|o| o.login.as_str()).collect();
        tracing::info!(count = logins.len(), organizations = %logins.join(", "), "Found organizations");
    }

    fn organization_started(&mut self, organization: &Organization) {
        tracing::info!(organization = %organization.login, "Processing organization");
    }

    fn repositories_found(&mut self, organization: &Organization, count: usize) {
        tracing::info!(organization = %organization.login, count, "Found repositories");
    }

    fn repository_started(&mut self, repository: &Repository) {
        tracing::info!(repository = %repository.name, "Processing repository");
    }

    fn collaborators_added(&mut self, repository: &Repository, count: usize) {
        tracing::info!(repository = %repository.name, count, "Added collaborators");
    }

    // The fetcher already warned with the status and body
    fn fetch_failed(&mut self, scope: &FetchScope, failure: &FetchFailure) {
        tracing::debug!(scope = ?scope, status = failure.status, "Listing incomplete, continuing");
    }

    fn finished(&mut self, summary: &AuditSummary) {
        tracing::info!(
            organizations = summary.organizations,
            repositories = summary.repositories,
            rows = summary.rows,
            emails_found = summary.emails_found,
            failures = summary.failures,
            "Audit finished"
        );
    }
}

/// Drives organization → repository → collaborator enumeration
pub struct Auditor<'c> {
    fetcher: PaginatedFetcher<'c>,
    emails: EmailResolver<'c>,
    paginate_memberships: bool,
}

impl<'c> Auditor<'c> {
    /// # Errors
    ///
    /// Returns error if a masked-email pattern does not compile
    pub fn new(client: &'c GitHubClient, config: &AuditConfig) -> Result<Self> {
        let filter = MaskedEmailFilter::from_config(&config.email)?;
        Ok(Self {
            fetcher: PaginatedFetcher::from_config(client, config),
            emails: EmailResolver::new(client, filter),
            paginate_memberships: config.api.paginate_memberships,
        })
    }

    /// Runs the audit, writing one row per collaborator to `sink`
    ///
    /// `organizations` overrides membership discovery when non-empty.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, an undecodable listing, or a
    /// sink write failure; non-200 listings are reported to `observer` and
    /// skipped
    pub fn run(
        &self,
        organizations: &[String],
        sink: &mut dyn ReportSink,
        observer: &mut dyn AuditObserver,
    ) -> Result<AuditSummary> {
        let mut summary = AuditSummary::default();

        let resolved = resolve_organizations(&self.fetcher, organizations, self.paginate_memberships)?;
        if let Some(failure) = &resolved.failure {
            summary.failures += 1;
            observer.fetch_failed(&FetchScope::Organizations, failure);
        }
        if organizations.is_empty() {
            observer.organizations_resolved(&resolved.items);
        }

        for organization in &resolved.items {
            self.audit_organization(organization, sink, observer, &mut summary)?;
        }

        observer.finished(&summary);
        Ok(summary)
    }

    fn audit_organization(
        &self,
        organization: &Organization,
        sink: &mut dyn ReportSink,
        observer: &mut dyn AuditObserver,
        summary: &mut AuditSummary,
    ) -> Result<()> {
        summary.organizations += 1;
        observer.organization_started(organization);

        let repositories = list_repositories(&self.fetcher, organization)?;
        if let Some(failure) = &repositories.failure {
            summary.failures += 1;
            observer.fetch_failed(
                &FetchScope::Repositories {
                    organization: organization.login.clone(),
                },
                failure,
            );
        }
        observer.repositories_found(organization, repositories.items.len());

        for repository in &repositories.items {
            self.audit_repository(repository, sink, observer, summary)?;
        }
        Ok(())
    }

    fn audit_repository(
        &self,
        repository: &Repository,
        sink: &mut dyn ReportSink,
        observer: &mut dyn AuditObserver,
        summary: &mut AuditSummary,
    ) -> Result<()> {
        summary.repositories += 1;
        observer.repository_started(repository);

        let collaborators = list_collaborators(&self.fetcher, repository)?;
        if let Some(failure) = &collaborators.failure {
            summary.failures += 1;
            observer.fetch_failed(
                &FetchScope::Collaborators {
                    organization: repository.organization.clone(),
                    repository: repository.name.clone(),
                },
                failure,
            );
        }

        for collaborator in &collaborators.items {
            let email = self.emails.resolve(&collaborator.login)?;
            if email.is_found() {
                summary.emails_found += 1;
            }
            let row = ReportRow {
                organization: repository.organization.clone(),
                repository: repository.name.clone(),
                username: collaborator.login.clone(),
                email,
                permission: collaborator.permission_level(),
            };
            sink.write_row(&row)?;
            summary.rows += 1;
        }

        observer.collaborators_added(repository, collaborators.items.len());
        Ok(())
    }
}
