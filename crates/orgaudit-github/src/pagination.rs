//! Paged collection retrieval
//!
//! GitHub listings are fetched with `page=1,2,…` and a fixed `per_page`
//! until a page comes back empty. A non-200 page ends the listing: the
//! items gathered so far are kept and the failure is reported alongside
//! them instead of being raised.
//!
//! ```text
//! page 1 ──► 200 [100 items]
//!            remaining < threshold? ──► sleep(cooldown)
//! page 2 ──► 200 [100 items]
//! page 3 ──► 200 [50 items]
//! page 4 ──► 200 []               ──► done (250 items)
//! ```

use crate::client::GitHubClient;
use crate::rate_limit::{RateLimitPolicy, RateLimitState};
use orgaudit_core::Result;
use orgaudit_core::config::AuditConfig;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// A non-200 answer that ended a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Items gathered by a fetch and the failure that cut it short, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome<T> {
    pub items: Vec<T>,
    pub failure: Option<FetchFailure>,
}

impl<T> FetchOutcome<T> {
    /// A fetch that ran to completion
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            failure: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> FetchOutcome<U> {
        FetchOutcome {
            items: self.items.into_iter().map(f).collect(),
            failure: self.failure,
        }
    }
}

/// One step of a paged listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page<T> {
    Items(Vec<T>),
    Failed(FetchFailure),
}

/// Issues paged requests with rate-limit backoff
#[derive(Debug)]
pub struct PaginatedFetcher<'c> {
    client: &'c GitHubClient,
    per_page: u32,
    rate_limit: RateLimitPolicy,
}

impl<'c> PaginatedFetcher<'c> {
    pub fn new(client: &'c GitHubClient, per_page: u32, rate_limit: RateLimitPolicy) -> Self {
        Self {
            client,
            per_page,
            rate_limit,
        }
    }

    pub fn from_config(client: &'c GitHubClient, config: &AuditConfig) -> Self {
        Self::new(
            client,
            config.api.per_page,
            RateLimitPolicy::from_config(&config.rate_limit),
        )
    }

    pub fn client(&self) -> &'c GitHubClient {
        self.client
    }

    /// Lazy sequence of pages for `segments`
    ///
    /// `extra` query pairs are sent with every page request.
    pub fn pages<T: DeserializeOwned>(&self, segments: &[&str], extra: &[(&str, &str)]) -> Pages<'c, T> {
        Pages {
            client: self.client,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            extra: extra
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            per_page: self.per_page,
            rate_limit: self.rate_limit,
            next_page: 1,
            last_state: None,
            finished: false,
            _marker: PhantomData,
        }
    }

    /// Collects every page of `segments`
    ///
    /// # Errors
    ///
    /// Returns error only for transport failures and undecodable bodies;
    /// non-200 statuses end up in [`FetchOutcome::failure`]
    pub fn fetch_all<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        extra: &[(&str, &str)],
    ) -> Result<FetchOutcome<T>> {
        let mut outcome = FetchOutcome::complete(Vec::new());
        for page in self.pages(segments, extra) {
            match page? {
                Page::Items(items) => outcome.items.extend(items),
                Page::Failed(failure) => outcome.failure = Some(failure),
            }
        }
        Ok(outcome)
    }

    /// Single unpaged request returning a JSON array
    pub fn fetch_unpaged<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<FetchOutcome<T>> {
        let response = self.client.get(segments, &[])?;
        if !response.is_success() {
            let failure = FetchFailure {
                url: response.url.to_string(),
                status: response.status,
                body: response.body,
            };
            log_failure(&failure);
            return Ok(FetchOutcome {
                items: Vec::new(),
                failure: Some(failure),
            });
        }
        Ok(FetchOutcome::complete(response.json()?))
    }
}

/// Iterator over the pages of one listing
///
/// Yields nothing further after an empty page, a failed page or an error.
#[derive(Debug)]
pub struct Pages<'c, T> {
    client: &'c GitHubClient,
    segments: Vec<String>,
    extra: Vec<(String, String)>,
    per_page: u32,
    rate_limit: RateLimitPolicy,
    next_page: u32,
    last_state: Option<RateLimitState>,
    finished: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Pages<'_, T> {
    fn cool_down_if_needed(&mut self) {
        if let Some(state) = self.last_state.take() {
            if self.rate_limit.cooldown_needed(&state) {
                tracing::warn!(
                    remaining = ?state.remaining,
                    cooldown_secs = self.rate_limit.cooldown.as_secs(),
                    "Rate limit approaching, cooling down"
                );
                self.client.sleeper().sleep(self.rate_limit.cooldown);
            }
        }
    }

    fn query(&self) -> Vec<(&str, String)> {
        let mut query = vec![
            ("per_page", self.per_page.to_string()),
            ("page", self.next_page.to_string()),
        ];
        query.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.clone())));
        query
    }
}

impl<T: DeserializeOwned> Iterator for Pages<'_, T> {
    type Item = Result<Page<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.cool_down_if_needed();

        let segments: Vec<&str> = self.segments.iter().map(String::as_str).collect();
        let query = self.query();
        let response = match self.client.get(&segments, &query) {
            Ok(response) => response,
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        };
        self.last_state = Some(response.rate_limit);

        if !response.is_success() {
            self.finished = true;
            let failure = FetchFailure {
                url: response.url.to_string(),
                status: response.status,
                body: response.body,
            };
            log_failure(&failure);
            return Some(Ok(Page::Failed(failure)));
        }

        let items: Vec<T> = match response.json() {
            Ok(items) => items,
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        };

        if items.is_empty() {
            self.finished = true;
            return None;
        }

        self.next_page += 1;
        Some(Ok(Page::Items(items)))
    }
}

fn log_failure(failure: &FetchFailure) {
    tracing::warn!(
        url = %failure.url,
        status = failure.status,
        body = %failure.body,
        "Request failed"
    );
}
