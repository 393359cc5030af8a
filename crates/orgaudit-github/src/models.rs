//! Wire shapes of the GitHub REST responses the audit reads
//!
//! Only the fields the audit uses are declared; everything else in the
//! payload is ignored.

use serde::{Deserialize, Deserializer};

/// Entry of `GET /orgs/{org}/repos`
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
}

/// `GET /users/{username}`
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Event type carrying commits
pub const PUSH_EVENT: &str = "PushEvent";

/// Entry of `GET /users/{username}/events/public`
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: Option<EventPayload>,
}

impl Event {
    pub fn is_push(&self) -> bool {
        self.kind == PUSH_EVENT
    }

    /// Commits of a push event; empty for other event types
    pub fn commits(&self) -> &[Commit] {
        match &self.payload {
            Some(payload) if self.is_push() => payload.commits.as_slice(),
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

impl Commit {
    /// Author email if present and non-empty
    pub fn author_email(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|a| a.email.as_deref())
            .filter(|e| !e.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub email: Option<String>,
}

/// Treats an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
