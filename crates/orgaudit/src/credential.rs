//! Token resolution

use orgaudit_core::{AuditError, Result};
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Please enter your GitHub Personal Access Token: ";

/// Returns the token from the command line (or environment), else asks `prompt`
///
/// Surrounding whitespace is dropped. An empty result is an error.
pub fn resolve_token<F>(supplied: Option<String>, prompt: F) -> Result<String>
where
    F: FnOnce() -> io::Result<String>,
{
    let raw = match supplied {
        Some(token) if !token.trim().is_empty() => token,
        _ => prompt()?,
    };

    let token = raw.trim();
    if token.is_empty() {
        return Err(AuditError::CredentialMissing);
    }
    Ok(token.to_string())
}

/// Prompts on stderr and reads one line from stdin
pub fn prompt_stdin() -> io::Result<String> {
    let mut err = io::stderr().lock();
    write!(err, "{PROMPT}")?;
    err.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}
