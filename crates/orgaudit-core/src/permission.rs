//! Permission level classification
//!
//! GitHub reports a collaborator's access to a repository as a set of boolean
//! capability flags. The report collapses that set into one label using a
//! fixed precedence: the first flag that is set, in the order
//! admin, maintain, push, triage, pull, decides the level.

use serde::Deserialize;
use std::fmt;

/// Capability flags attached to a collaborator for one repository
///
/// Flags missing from the API payload deserialize as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CapabilityFlags {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub maintain: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub triage: bool,
    #[serde(default)]
    pub pull: bool,
}

/// Effective permission level shown in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionLevel {
    Admin,
    Maintain,
    Write,
    Triage,
    Read,
    /// No capability flag was set
    Unknown,
}

impl PermissionLevel {
    /// Label written to the report's Permission column
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::Admin => "Admin",
            PermissionLevel::Maintain => "Maintain",
            PermissionLevel::Write => "Write",
            PermissionLevel::Triage => "Triage",
            PermissionLevel::Read => "Read",
            PermissionLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a capability flag set into a single permission level
///
/// Flags are not combined: `{push, pull}` is `Write`, and an empty set is
/// `Unknown`.
pub fn classify(flags: &CapabilityFlags) -> PermissionLevel {
    if flags.admin {
        PermissionLevel::Admin
    } else if flags.maintain {
        PermissionLevel::Maintain
    } else if flags.push {
        PermissionLevel::Write
    } else if flags.triage {
        PermissionLevel::Triage
    } else if flags.pull {
        PermissionLevel::Read
    } else {
        PermissionLevel::Unknown
    }
}

impl From<&CapabilityFlags> for PermissionLevel {
    fn from(flags: &CapabilityFlags) -> Self {
        classify(flags)
    }
}
