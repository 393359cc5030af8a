//! Default values shared across the workspace

/// GitHub REST API settings
pub mod api {
    /// Public GitHub REST API root
    pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

    /// Environment variable that overrides the API root
    pub const BASE_URL_ENV: &str = "ORGAUDIT_API_URL";

    /// Items requested per page for paginated listings
    pub const PER_PAGE: u32 = 100;

    /// Per-request timeout in seconds
    pub const TIMEOUT_SECS: u64 = 30;
}

/// Proactive rate-limit backoff
pub mod rate_limit {
    /// Remaining-quota low-water mark
    pub const THRESHOLD: u32 = 10;

    /// Cooldown applied once remaining quota drops below the threshold
    pub const COOLDOWN_SECS: u64 = 60;
}

/// Transport retry policy
pub mod retry {
    /// Total attempts per request, including the first
    pub const MAX_ATTEMPTS: u32 = 3;

    pub const INITIAL_DELAY_MS: u64 = 1_000;

    pub const MAX_DELAY_MS: u64 = 30_000;

    pub const BACKOFF_MULTIPLIER: f64 = 2.0;
}

/// Email resolution
pub mod email {
    /// Patterns matching masked commit author addresses
    pub const MASKED_PATTERNS: &[&str] = &[r"noreply\.github\.com$"];
}

/// Report output
pub mod report {
    /// Default output file name
    pub const DEFAULT_OUTPUT: &str = "github_org_report.csv";
}

/// Credential lookup
pub mod credential {
    /// Environment variable consulted when no token flag is given
    pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
}
