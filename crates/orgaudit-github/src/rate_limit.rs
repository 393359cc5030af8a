//! Proactive rate-limit backoff
//!
//! Every API response carries the remaining request quota. When it drops
//! below the configured threshold, the next paginated request waits out a
//! fixed cooldown first.

use orgaudit_core::config::RateLimitConfig;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Response header carrying the remaining request quota
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Quota signal read from one response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitState {
    /// `None` when the header is absent or unparseable
    pub remaining: Option<u32>,
}

impl RateLimitState {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let remaining = headers
            .get(REMAINING_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        Self { remaining }
    }
}

/// Threshold and cooldown applied between pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub threshold: u32,
    pub cooldown: Duration,
}

impl RateLimitPolicy {
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self {
            threshold: config.threshold,
            cooldown: config.cooldown(),
        }
    }

    /// True when `state` reports a quota strictly below the threshold
    pub fn cooldown_needed(&self, state: &RateLimitState) -> bool {
        matches!(state.remaining, Some(remaining) if remaining < self.threshold)
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::from_config(&RateLimitConfig::default())
    }
}
