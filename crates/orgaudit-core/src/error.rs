use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    // Config errors
    #[error("CONFIG_NOT_FOUND: config file '{path}' does not exist")]
    ConfigNotFound { path: PathBuf },

    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Credential errors
    #[error("CREDENTIAL_MISSING: no GitHub token was supplied")]
    CredentialMissing,

    // Network errors
    #[error("TRANSPORT_FAILED: {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("DECODE_FAILED: unexpected response body from {url}: {reason}")]
    Decode { url: String, reason: String },

    // Report errors
    #[error("REPORT_WRITE_FAILED: {0}")]
    ReportWrite(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<csv::Error> for AuditError {
    fn from(err: csv::Error) -> Self {
        AuditError::ReportWrite(err.to_string())
    }
}

impl From<toml::de::Error> for AuditError {
    fn from(err: toml::de::Error) -> Self {
        AuditError::ConfigParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
