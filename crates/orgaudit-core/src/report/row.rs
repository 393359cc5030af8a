use crate::permission::PermissionLevel;
use std::fmt;

/// Text written when no email could be resolved
pub const EMAIL_UNAVAILABLE: &str = "Not available";

/// Outcome of a best-effort email lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Email {
    Found(String),
    Unavailable,
}

impl Email {
    pub fn as_str(&self) -> &str {
        match self {
            Email::Found(address) => address,
            Email::Unavailable => EMAIL_UNAVAILABLE,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Email::Found(_))
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the report: a collaborator on a repository in an organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub organization: String,
    pub repository: String,
    pub username: String,
    pub email: Email,
    pub permission: PermissionLevel,
}

impl ReportRow {
    /// Fields in column order
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.organization,
            &self.repository,
            &self.username,
            self.email.as_str(),
            self.permission.as_str(),
        ]
    }
}
