//! Target organization resolution

use crate::pagination::{FetchOutcome, PaginatedFetcher};
use orgaudit_core::{Organization, Result};

/// Organizations to audit
///
/// A non-empty `explicit` list is used verbatim, without checking that the
/// organizations exist. Otherwise the caller's memberships are listed from
/// `GET /user/orgs`, as a single request unless `paginate` is set.
pub fn resolve_organizations(
    fetcher: &PaginatedFetcher<'_>,
    explicit: &[String],
    paginate: bool,
) -> Result<FetchOutcome<Organization>> {
    if !explicit.is_empty() {
        return Ok(FetchOutcome::complete(
            explicit.iter().map(Organization::new).collect(),
        ));
    }

    let segments = ["user", "orgs"];
    if paginate {
        fetcher.fetch_all(&segments, &[])
    } else {
        fetcher.fetch_unpaged(&segments)
    }
}
