//! Mock GitHub API servers for testing
//!
//! Most tests share one mockito server and keep out of each other's way by
//! mocking organization- or user-specific paths (`/orgs/<unique>/repos`).
//! Tests that must mock a global path such as `/user/orgs` take an
//! [`isolated_mock_server`] instead.

use lazy_static::lazy_static;
use mockito::{Matcher, Server, ServerGuard};
use std::sync::Mutex;

lazy_static! {
    /// Global shared mockito server for all tests in one test binary
    pub static ref SHARED_MOCK_SERVER: Mutex<ServerGuard> = Mutex::new(Server::new());
}

/// Get reference to shared mock server
///
/// Acquire the lock only while creating mocks, not for the whole test:
///
/// ```no_run
/// use orgaudit_testkit::get_shared_mock_server;
///
/// fn test_with_shared_server() {
///     let (url, mock) = {
///         let mut server = get_shared_mock_server();
///         let mock = server
///             .mock("GET", "/orgs/unique-org/repos")
///             .with_status(200)
///             .with_body("[]")
///             .create();
///         (server.url(), mock)
///     }; // Lock released here
///     // ... point the client at `url` ...
///     mock.assert();
/// }
/// ```
pub fn get_shared_mock_server() -> std::sync::MutexGuard<'static, ServerGuard> {
    SHARED_MOCK_SERVER.lock().unwrap_or_else(|poisoned| {
        // The server stays usable after a panicking test; the lock only
        // serializes mock creation.
        poisoned.into_inner()
    })
}

/// Starts a dedicated mock server for a single test
pub fn isolated_mock_server() -> ServerGuard {
    Server::new()
}

/// Query matcher for one page of a paginated listing
///
/// Matches `page` and `per_page` plus any `extra` pairs, in any order.
pub fn page_query(page: u32, per_page: u32, extra: &[(&str, &str)]) -> Matcher {
    let mut matchers = vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("per_page".into(), per_page.to_string()),
    ];
    matchers.extend(
        extra
            .iter()
            .map(|(k, v)| Matcher::UrlEncoded((*k).to_string(), (*v).to_string())),
    );
    Matcher::AllOf(matchers)
}
