use super::consts;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// orgaudit.toml schema
///
/// Every section and field is optional; missing values fall back to the
/// defaults in [`consts`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page through `/user/orgs` like the other listings
    #[serde(default)]
    pub paginate_memberships: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
            paginate_memberships: false,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    consts::api::DEFAULT_BASE_URL.to_string()
}

fn default_per_page() -> u32 {
    consts::api::PER_PAGE
}

fn default_timeout_secs() -> u64 {
    consts::api::TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl RateLimitConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

fn default_threshold() -> u32 {
    consts::rate_limit::THRESHOLD
}

fn default_cooldown_secs() -> u64 {
    consts::rate_limit::COOLDOWN_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per request, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    /// Delay before retry number `retry` (1-based), capped at `max_delay`
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1) as i32;
        let millis = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        let capped = millis.min(self.max_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }
}

fn default_max_attempts() -> u32 {
    consts::retry::MAX_ATTEMPTS
}

fn default_initial_delay_ms() -> u64 {
    consts::retry::INITIAL_DELAY_MS
}

fn default_max_delay_ms() -> u64 {
    consts::retry::MAX_DELAY_MS
}

fn default_backoff_multiplier() -> f64 {
    consts::retry::BACKOFF_MULTIPLIER
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Regular expressions for masked author addresses to skip
    #[serde(default = "default_masked_patterns")]
    pub masked_patterns: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            masked_patterns: default_masked_patterns(),
        }
    }
}

fn default_masked_patterns() -> Vec<String> {
    consts::email::MASKED_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}
