//! URL construction helpers for GitHub API endpoints

use thiserror::Error;
use url::Url;

/// Parses a configured API root, rejecting URLs that cannot take a path
///
/// Accepts GitHub Enterprise style roots such as `https://ghe.example.com/api/v3`.
pub fn parse_api_base_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(UrlError::CannotBeABase { url });
    }
    Ok(url)
}

/// Helper to safely append path segments to URL
///
/// Segments are percent-encoded, so an organization or repository name
/// can never escape its path position. Any existing base path is kept.
///
/// # Errors
///
/// Returns error if URL cannot be a base
pub fn add_path_segments(url: &mut Url, segments: &[&str]) -> Result<(), UrlError> {
    let url_for_error = url.clone();
    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase { url: url_for_error })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

/// URL construction errors
#[derive(Debug, Error)]
pub enum UrlError {
    /// URL cannot be used as a base
    #[error("URL cannot be a base: {url}")]
    CannotBeABase {
        /// The problematic URL
        url: Url,
    },

    /// Invalid URL parse error
    #[error("Invalid URL: {0}")]
    ParseError(#[from] url::ParseError),
}

impl From<UrlError> for orgaudit_core::AuditError {
    fn from(err: UrlError) -> Self {
        orgaudit_core::AuditError::ConfigInvalidValue {
            field: "api.base_url".to_string(),
            reason: err.to_string(),
        }
    }
}
