//! Repository listing for one organization

use crate::models::RepositoryRecord;
use crate::pagination::{FetchOutcome, PaginatedFetcher};
use orgaudit_core::{Organization, Repository, Result};

/// All repositories of `organization`, in API order
pub fn list_repositories(
    fetcher: &PaginatedFetcher<'_>,
    organization: &Organization,
) -> Result<FetchOutcome<Repository>> {
    let outcome: FetchOutcome<RepositoryRecord> =
        fetcher.fetch_all(&["orgs", &organization.login, "repos"], &[])?;

    Ok(outcome.map(|record| Repository {
        name: record.name,
        organization: organization.login.clone(),
    }))
}
