//! Test utilities for orgaudit
//!
//! This crate provides shared testing utilities used across the orgaudit workspace.

pub mod fixtures;
pub mod mock;

pub use mock::{get_shared_mock_server, isolated_mock_server, page_query};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// All test output files land in one gitignored location that is easy to
/// clean up manually.
///
/// # Panics
///
/// Panics if the current directory is unavailable or `.tmp/` cannot be
/// created.
///
/// # Examples
///
/// ```rust
/// use orgaudit_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let report = temp.path().join("report.csv");
/// std::fs::write(&report, "Organization").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");

    let tmp_base = workspace_root.join(".tmp");

    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");

    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}
