//! Best-effort email resolution
//!
//! 1. The public profile email, when set, wins outright.
//! 2. Otherwise the public event timeline is scanned, most recent first, for
//!    push events; the first commit author email that is not a masked
//!    address is used.
//! 3. Otherwise the email is [`Email::Unavailable`].
//!
//! Failed lookups resolve to `Unavailable` rather than an error. Only
//! transport failures propagate.

use crate::client::GitHubClient;
use crate::models::{Event, UserProfile};
use orgaudit_core::config::EmailConfig;
use orgaudit_core::{AuditError, Email, Result};
use regex::Regex;

/// Recognizes masked (no-reply) commit author addresses
#[derive(Debug, Clone)]
pub struct MaskedEmailFilter {
    patterns: Vec<Regex>,
}

impl MaskedEmailFilter {
    /// Compiles the given regular expressions
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalidValue` for a pattern that does not compile
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|e| AuditError::ConfigInvalidValue {
                    field: "email.masked_patterns".to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        Self::new(config.masked_patterns.as_slice())
    }

    /// True if any pattern matches, ignoring ASCII case
    pub fn is_masked(&self, email: &str) -> bool {
        let email = email.trim().to_ascii_lowercase();
        self.patterns.iter().any(|p| p.is_match(&email))
    }
}

/// First usable commit author email in timeline order
///
/// Scanning stops at the first match.
pub fn first_unmasked_commit_email<'e>(
    events: &'e [Event],
    filter: &MaskedEmailFilter,
) -> Option<&'e str> {
    events
        .iter()
        .flat_map(Event::commits)
        .filter_map(|commit| commit.author_email())
        .find(|email| !filter.is_masked(email))
}

/// Looks up one user's email through the API
pub struct EmailResolver<'c> {
    client: &'c GitHubClient,
    filter: MaskedEmailFilter,
}

impl<'c> EmailResolver<'c> {
    pub fn new(client: &'c GitHubClient, filter: MaskedEmailFilter) -> Self {
        Self { client, filter }
    }

    /// Resolves `username` to an email or [`Email::Unavailable`]
    ///
    /// # Errors
    ///
    /// Returns error only when the request itself cannot be completed
    pub fn resolve(&self, username: &str) -> Result<Email> {
        let profile = self.client.get(&["users", username], &[])?;
        if !profile.is_success() {
            tracing::debug!(username, status = profile.status, "Profile lookup failed");
            return Ok(Email::Unavailable);
        }

        match profile.json::<UserProfile>() {
            Ok(user) => {
                if let Some(email) = user.email.filter(|e| !e.trim().is_empty()) {
                    return Ok(Email::Found(email));
                }
            }
            Err(e) => {
                tracing::warn!(username, error = %e, "Unreadable profile");
                return Ok(Email::Unavailable);
            }
        }

        self.resolve_from_timeline(username)
    }

    fn resolve_from_timeline(&self, username: &str) -> Result<Email> {
        let timeline = self
            .client
            .get(&["users", username, "events", "public"], &[])?;
        if !timeline.is_success() {
            tracing::debug!(username, status = timeline.status, "Event timeline lookup failed");
            return Ok(Email::Unavailable);
        }

        let events: Vec<Event> = match timeline.json() {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(username, error = %e, "Unreadable event timeline");
                return Ok(Email::Unavailable);
            }
        };

        Ok(first_unmasked_commit_email(&events, &self.filter)
            .map(|email| Email::Found(email.to_string()))
            .unwrap_or(Email::Unavailable))
    }
}
