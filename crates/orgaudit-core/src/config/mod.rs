//! Run configuration
//!
//! Configuration comes from an optional TOML file, then environment
//! overrides. Command-line flags are applied by the binary on top.

pub mod consts;
pub mod model;

pub use model::{ApiConfig, AuditConfig, EmailConfig, RateLimitConfig, RetryConfig};

use crate::error::{AuditError, Result};
use std::path::Path;

impl AuditConfig {
    /// Parses configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AuditConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or invalid
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AuditError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads from `path` when given, otherwise defaults, then applies
    /// process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(consts::api::BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
    }

    /// Rejects values that would stall or break a run
    pub fn validate(&self) -> Result<()> {
        if self.api.per_page == 0 || self.api.per_page > 100 {
            return Err(AuditError::ConfigInvalidValue {
                field: "api.per_page".to_string(),
                reason: format!("must be between 1 and 100, got {}", self.api.per_page),
            });
        }
        if self.api.base_url.trim().is_empty() {
            return Err(AuditError::ConfigInvalidValue {
                field: "api.base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.retry.max_attempts == 0 {
            return Err(AuditError::ConfigInvalidValue {
                field: "retry.max_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.retry.backoff_multiplier < 1.0 {
            return Err(AuditError::ConfigInvalidValue {
                field: "retry.backoff_multiplier".to_string(),
                reason: format!("must be >= 1.0, got {}", self.retry.backoff_multiplier),
            });
        }
        Ok(())
    }
}
