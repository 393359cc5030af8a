//! Collaborator listing for one repository

use crate::pagination::{FetchOutcome, PaginatedFetcher};
use orgaudit_core::{Collaborator, Repository, Result};

/// Affiliation filter covering direct, outside and team-derived grants
pub const AFFILIATION_ALL: &str = "all";

/// All collaborators of `repository`, in API order
pub fn list_collaborators(
    fetcher: &PaginatedFetcher<'_>,
    repository: &Repository,
) -> Result<FetchOutcome<Collaborator>> {
    fetcher.fetch_all(
        &["repos", &repository.organization, &repository.name, "collaborators"],
        &[("affiliation", AFFILIATION_ALL)],
    )
}
