use crate::permission::{CapabilityFlags, PermissionLevel, classify};
use serde::Deserialize;

/// Organization targeted by a report run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    pub login: String,
}

impl Organization {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

/// Repository owned by an organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    /// Login of the owning organization
    pub organization: String,
}

/// Collaborator on a single repository
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Collaborator {
    pub login: String,
    #[serde(default)]
    pub permissions: CapabilityFlags,
}

impl Collaborator {
    pub fn permission_level(&self) -> PermissionLevel {
        classify(&self.permissions)
    }
}
