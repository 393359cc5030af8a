//! HTTP client construction and authenticated requests

use crate::rate_limit::RateLimitState;
use crate::retry::with_retry;
use crate::sleep::{Sleeper, ThreadSleeper};
use crate::url::{add_path_segments, parse_api_base_url};
use orgaudit_core::config::{AuditConfig, RetryConfig};
use orgaudit_core::{AuditError, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use url::Url;

/// User agent sent with every request (GitHub rejects requests without one)
pub const USER_AGENT: &str = "orgaudit";

/// Media type selecting the stable v3 JSON API
pub const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";

/// Builds HTTP client with appropriate settings for GitHub
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_client(timeout: Duration) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Credential plus the headers derived from it
#[derive(Clone)]
pub struct AuthContext {
    token: String,
}

impl AuthContext {
    /// Wraps a personal access token
    ///
    /// # Errors
    ///
    /// Returns `CredentialMissing` for an empty or blank token
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(AuditError::CredentialMissing);
        }
        Ok(Self { token })
    }

    /// Authorization and API-version headers attached to every request
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {}", self.token))
            .map_err(|_| AuditError::Generic("token contains characters not allowed in a header".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_V3));
        Ok(headers)
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext").field("token", &"<redacted>").finish()
    }
}

/// Status, quota and body of one API call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: Url,
    pub status: u16,
    pub rate_limit: RateLimitState,
    pub body: String,
}

impl ApiResponse {
    /// Success is exactly 200
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Decodes the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| AuditError::Decode {
            url: self.url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Authenticated GitHub REST client
///
/// Requests are issued one at a time. Transport failures are retried per
/// the configured [`RetryConfig`]; HTTP statuses are returned as-is.
pub struct GitHubClient {
    http: Client,
    auth: AuthContext,
    base_url: Url,
    retry: RetryConfig,
    sleeper: Box<dyn Sleeper>,
}

impl GitHubClient {
    /// Creates a client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be built
    pub fn new(auth: AuthContext, config: &AuditConfig) -> Result<Self> {
        let base_url = parse_api_base_url(&config.api.base_url)?;
        let http = build_client(config.api.timeout()).map_err(|e| AuditError::Transport {
            url: base_url.to_string(),
            reason: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            http,
            auth,
            base_url,
            retry: config.retry.clone(),
            sleeper: Box::new(ThreadSleeper),
        })
    }

    /// Replaces the sleeper used for retry delays and rate-limit cooldowns
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn sleeper(&self) -> &dyn Sleeper {
        self.sleeper.as_ref()
    }

    /// Resolves path segments against the API root
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        add_path_segments(&mut url, segments)?;
        Ok(url)
    }

    /// Issues a GET request
    ///
    /// # Errors
    ///
    /// Returns `Transport` once retries are exhausted; non-200 statuses are
    /// not errors here
    pub fn get(&self, segments: &[&str], query: &[(&str, String)]) -> Result<ApiResponse> {
        let url = self.endpoint(segments)?;
        let headers = self.auth.headers()?;

        tracing::debug!(url = %url, query = ?query, "GET");

        let response = with_retry(&self.retry, self.sleeper(), || {
            self.send_once(&url, &headers, query)
        })
        .map_err(|e| AuditError::Transport {
            url: url.to_string(),
            reason: e.without_url().to_string(),
        })?;

        tracing::debug!(
            url = %url,
            status = response.status,
            remaining = ?response.rate_limit.remaining,
            "Response received"
        );

        Ok(response)
    }

    fn send_once(
        &self,
        url: &Url,
        headers: &HeaderMap,
        query: &[(&str, String)],
    ) -> std::result::Result<ApiResponse, reqwest::Error> {
        let response = self
            .http
            .get(url.clone())
            .headers(headers.clone())
            .query(query)
            .send()?;

        let status = response.status().as_u16();
        let rate_limit = RateLimitState::from_headers(response.headers());
        let body = response.text()?;

        Ok(ApiResponse {
            url: url.clone(),
            status,
            rate_limit,
            body,
        })
    }
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.auth)
            .field("retry", &self.retry)
            .finish()
    }
}
