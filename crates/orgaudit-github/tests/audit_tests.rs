//! End-to-end report runs against a mock GitHub API

use mockito::Mock;
use orgaudit_core::config::AuditConfig;
use orgaudit_core::{CsvReportWriter, Email, Organization, PermissionLevel, ReportRow, Repository};
use orgaudit_github::{
    AuditObserver, AuditSummary, Auditor, AuthContext, FetchFailure, FetchScope, GitHubClient,
    RecordingSleeper, TracingObserver,
};
use orgaudit_testkit::fixtures::{
    collaborators_json, events_json, orgs_json, push_event, reader, repos_json, user_json, writer,
};
use orgaudit_testkit::{get_shared_mock_server, isolated_mock_server, page_query};
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Observer that remembers what it was told
#[derive(Default)]
struct RecordingObserver {
    resolved: Vec<String>,
    started: Vec<String>,
    repositories_found: Vec<(String, usize)>,
    collaborators_added: Vec<(String, usize)>,
    failures: Vec<(FetchScope, u16)>,
    finished: Option<AuditSummary>,
}

impl AuditObserver for RecordingObserver {
    fn organizations_resolved(&mut self, organizations: &[Organization]) {
        self.resolved = organizations.iter().map(|o| o.login.clone()).collect();
    }

    fn organization_started(&mut self, organization: &Organization) {
        self.started.push(organization.login.clone());
    }

    fn repositories_found(&mut self, organization: &Organization, count: usize) {
        self.repositories_found.push((organization.login.clone(), count));
    }

    fn collaborators_added(&mut self, repository: &Repository, count: usize) {
        self.collaborators_added.push((repository.name.clone(), count));
    }

    fn fetch_failed(&mut self, scope: &FetchScope, failure: &FetchFailure) {
        self.failures.push((scope.clone(), failure.status));
    }

    fn finished(&mut self, summary: &AuditSummary) {
        self.finished = Some(summary.clone());
    }
}

fn config_for(base_url: &str) -> AuditConfig {
    let mut config = AuditConfig::default();
    config.api.base_url = base_url.to_string();
    config
}

fn client_for(config: &AuditConfig) -> GitHubClient {
    GitHubClient::new(AuthContext::new("test-token").unwrap(), config)
        .unwrap()
        .with_sleeper(RecordingSleeper::new())
}

/// Mocks a single-page repository listing (data page + empty page)
fn mock_repos(server: &mut mockito::Server, org: &str, names: &[&str]) -> Vec<Mock> {
    let path = format!("/orgs/{org}/repos");
    vec![
        server
            .mock("GET", path.as_str())
            .match_query(page_query(1, 100, &[]))
            .with_status(200)
            .with_body(repos_json(names))
            .create(),
        server
            .mock("GET", path.as_str())
            .match_query(page_query(2, 100, &[]))
            .with_status(200)
            .with_body("[]")
            .create(),
    ]
}

/// Mocks a single-page collaborator listing
fn mock_collaborators(
    server: &mut mockito::Server,
    org: &str,
    repo: &str,
    entries: &[serde_json::Value],
) -> Vec<Mock> {
    let path = format!("/repos/{org}/{repo}/collaborators");
    vec![
        server
            .mock("GET", path.as_str())
            .match_query(page_query(1, 100, &[("affiliation", "all")]))
            .with_status(200)
            .with_body(collaborators_json(entries))
            .create(),
        server
            .mock("GET", path.as_str())
            .match_query(page_query(2, 100, &[("affiliation", "all")]))
            .with_status(200)
            .with_body("[]")
            .create(),
    ]
}

/// Mocks a user with a profile email, or with an empty timeline when `None`
fn mock_user(server: &mut mockito::Server, login: &str, email: Option<&str>) -> Vec<Mock> {
    let mut mocks = vec![
        server
            .mock("GET", format!("/users/{login}").as_str())
            .with_status(200)
            .with_body(user_json(login, email))
            .create(),
    ];
    if email.is_none() {
        mocks.push(
            server
                .mock("GET", format!("/users/{login}/events/public").as_str())
                .with_status(200)
                .with_body("[]")
                .create(),
        );
    }
    mocks
}

#[test]
fn test_one_org_one_repo_two_collaborators() {
    let (url, _mocks) = {
        let mut server = get_shared_mock_server();
        let mut mocks = Vec::new();
        mocks.extend(mock_repos(&mut server, "audit-e2e", &["app"]));
        mocks.extend(mock_collaborators(
            &mut server,
            "audit-e2e",
            "app",
            &[writer("audit-e2e-alice"), reader("audit-e2e-bob")],
        ));
        mocks.extend(mock_user(&mut server, "audit-e2e-alice", Some("alice@example.com")));
        mocks.extend(mock_user(&mut server, "audit-e2e-bob", None));
        (server.url(), mocks)
    };

    let config = config_for(&url);
    let client = client_for(&config);
    let auditor = Auditor::new(&client, &config).unwrap();

    let mut sink = CsvReportWriter::new(Vec::new()).unwrap();
    let mut observer = RecordingObserver::default();
    let summary = auditor
        .run(&["audit-e2e".to_string()], &mut sink, &mut observer)
        .unwrap();

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.emails_found, 1);
    assert_eq!(summary.failures, 0);

    let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(
        text,
        "Organization,Repo Name,User Name,Email,Permission\n\
         audit-e2e,app,audit-e2e-alice,alice@example.com,Write\n\
         audit-e2e,app,audit-e2e-bob,Not available,Read\n"
    );

    // Explicit organizations are not "resolved" from memberships
    assert!(observer.resolved.is_empty());
    assert_eq!(observer.repositories_found, vec![("audit-e2e".to_string(), 1)]);
    assert_eq!(observer.collaborators_added, vec![("app".to_string(), 2)]);
    assert_eq!(observer.finished, Some(summary));
}

#[test]
fn test_failing_organization_does_not_block_its_neighbours() {
    let (url, _mocks) = {
        let mut server = get_shared_mock_server();
        let mut mocks = Vec::new();
        mocks.extend(mock_repos(&mut server, "audit-org-a", &["a1"]));
        mocks.push(
            server
                .mock("GET", "/orgs/audit-org-b/repos")
                .match_query(page_query(1, 100, &[]))
                .with_status(403)
                .with_body(r#"{"message":"Must have admin rights"}"#)
                .create(),
        );
        mocks.extend(mock_repos(&mut server, "audit-org-c", &["c1"]));
        mocks.extend(mock_collaborators(&mut server, "audit-org-a", "a1", &[writer("audit-xa")]));
        mocks.extend(mock_collaborators(&mut server, "audit-org-c", "c1", &[reader("audit-xc")]));
        mocks.extend(mock_user(&mut server, "audit-xa", Some("xa@example.com")));
        mocks.extend(mock_user(&mut server, "audit-xc", Some("xc@example.com")));
        (server.url(), mocks)
    };

    let config = config_for(&url);
    let client = client_for(&config);
    let auditor = Auditor::new(&client, &config).unwrap();

    let orgs: Vec<String> = ["audit-org-a", "audit-org-b", "audit-org-c"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut rows: Vec<ReportRow> = Vec::new();
    let mut observer = RecordingObserver::default();
    let summary = auditor.run(&orgs, &mut rows, &mut observer).unwrap();

    let seen: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.organization.as_str(), r.username.as_str()))
        .collect();
    assert_eq!(seen, vec![("audit-org-a", "audit-xa"), ("audit-org-c", "audit-xc")]);
    assert_eq!(rows[0].permission, PermissionLevel::Write);
    assert_eq!(rows[1].permission, PermissionLevel::Read);

    assert_eq!(summary.organizations, 3);
    assert_eq!(summary.repositories, 2);
    assert_eq!(summary.failures, 1);
    assert_eq!(observer.started, orgs);
    assert_eq!(
        observer.failures,
        vec![(
            FetchScope::Repositories {
                organization: "audit-org-b".to_string()
            },
            403
        )]
    );
}

#[test]
fn test_failing_collaborator_listing_skips_only_that_repository() {
    let (url, _mocks) = {
        let mut server = get_shared_mock_server();
        let mut mocks = Vec::new();
        mocks.extend(mock_repos(&mut server, "audit-collab-fail", &["locked", "open"]));
        mocks.push(
            server
                .mock("GET", "/repos/audit-collab-fail/locked/collaborators")
                .match_query(page_query(1, 100, &[("affiliation", "all")]))
                .with_status(404)
                .with_body(r#"{"message":"Not Found"}"#)
                .create(),
        );
        mocks.extend(mock_collaborators(
            &mut server,
            "audit-collab-fail",
            "open",
            &[reader("audit-open-reader")],
        ));
        mocks.extend(mock_user(&mut server, "audit-open-reader", None));
        (server.url(), mocks)
    };

    let config = config_for(&url);
    let client = client_for(&config);
    let auditor = Auditor::new(&client, &config).unwrap();

    let mut rows: Vec<ReportRow> = Vec::new();
    let mut observer = RecordingObserver::default();
    let summary = auditor
        .run(&["audit-collab-fail".to_string()], &mut rows, &mut observer)
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].repository, "open");
    assert_eq!(rows[0].email, Email::Unavailable);
    assert_eq!(summary.failures, 1);
    assert_eq!(
        observer.collaborators_added,
        vec![("locked".to_string(), 0), ("open".to_string(), 1)]
    );
}

#[test]
fn test_memberships_discovered_with_single_request() {
    let mut server = isolated_mock_server();
    let orgs = server
        .mock("GET", "/user/orgs")
        .with_status(200)
        .with_body(orgs_json(&["disc-one", "disc-two"]))
        .expect(1)
        .create();
    let _one = mock_repos(&mut server, "disc-one", &[]);
    let _two = mock_repos(&mut server, "disc-two", &[]);

    let config = config_for(&server.url());
    let client = client_for(&config);
    let auditor = Auditor::new(&client, &config).unwrap();

    let mut rows: Vec<ReportRow> = Vec::new();
    let mut observer = RecordingObserver::default();
    let summary = auditor.run(&[], &mut rows, &mut observer).unwrap();

    assert!(rows.is_empty());
    assert_eq!(observer.resolved, vec!["disc-one", "disc-two"]);
    assert_eq!(summary.organizations, 2);
    orgs.assert();
}

#[test]
fn test_membership_failure_yields_empty_report() {
    let mut server = isolated_mock_server();
    let _orgs = server
        .mock("GET", "/user/orgs")
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create();

    let config = config_for(&server.url());
    let client = client_for(&config);
    let auditor = Auditor::new(&client, &config).unwrap();

    let mut rows: Vec<ReportRow> = Vec::new();
    let mut observer = RecordingObserver::default();
    let summary = auditor.run(&[], &mut rows, &mut observer).unwrap();

    assert!(rows.is_empty());
    assert_eq!(summary.organizations, 0);
    assert_eq!(summary.failures, 1);
    assert_eq!(observer.failures, vec![(FetchScope::Organizations, 401)]);
}

#[test]
fn test_paginated_memberships_when_configured() {
    let mut server = isolated_mock_server();
    let first = server
        .mock("GET", "/user/orgs")
        .match_query(page_query(1, 100, &[]))
        .with_status(200)
        .with_body(orgs_json(&["paged-org"]))
        .expect(1)
        .create();
    let last = server
        .mock("GET", "/user/orgs")
        .match_query(page_query(2, 100, &[]))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create();
    let _repos = mock_repos(&mut server, "paged-org", &[]);

    let mut config = config_for(&server.url());
    config.api.paginate_memberships = true;
    let client = client_for(&config);
    let auditor = Auditor::new(&client, &config).unwrap();

    let mut rows: Vec<ReportRow> = Vec::new();
    let summary = auditor
        .run(&[], &mut rows, &mut RecordingObserver::default())
        .unwrap();

    assert_eq!(summary.organizations, 1);
    first.assert();
    last.assert();
}

#[test]
fn test_timeline_email_used_in_rows() {
    let (url, _mocks) = {
        let mut server = get_shared_mock_server();
        let mut mocks = Vec::new();
        mocks.extend(mock_repos(&mut server, "audit-timeline", &["svc"]));
        mocks.extend(mock_collaborators(
            &mut server,
            "audit-timeline",
            "svc",
            &[writer("audit-pusher")],
        ));
        mocks.push(
            server
                .mock("GET", "/users/audit-pusher")
                .with_status(200)
                .with_body(user_json("audit-pusher", None))
                .create(),
        );
        mocks.push(
            server
                .mock("GET", "/users/audit-pusher/events/public")
                .with_status(200)
                .with_body(events_json(&[
                    push_event(&["9+audit-pusher@users.noreply.github.com"]),
                    push_event(&["pusher@corp.example"]),
                ]))
                .create(),
        );
        (server.url(), mocks)
    };

    let config = config_for(&url);
    let client = client_for(&config);
    let auditor = Auditor::new(&client, &config).unwrap();

    let mut rows: Vec<ReportRow> = Vec::new();
    auditor
        .run(&["audit-timeline".to_string()], &mut rows, &mut RecordingObserver::default())
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email, Email::Found("pusher@corp.example".to_string()));
}

/// Layer that records the level of every event
#[derive(Clone, Default)]
struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

impl<S: Subscriber> Layer<S> for LevelRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.0.lock().unwrap().push(*event.metadata().level());
    }
}

#[test]
fn test_failed_listing_warns_once() {
    let (url, _mock) = {
        let mut server = get_shared_mock_server();
        let mock = server
            .mock("GET", "/orgs/audit-warn-once/repos")
            .match_query(page_query(1, 100, &[]))
            .with_status(403)
            .with_body(r#"{"message":"Forbidden"}"#)
            .create();
        (server.url(), mock)
    };

    let config = config_for(&url);
    let client = client_for(&config);
    let auditor = Auditor::new(&client, &config).unwrap();

    let recorder = LevelRecorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    let summary = tracing::subscriber::with_default(subscriber, || {
        let mut rows: Vec<ReportRow> = Vec::new();
        auditor
            .run(&["audit-warn-once".to_string()], &mut rows, &mut TracingObserver)
            .unwrap()
    });

    assert_eq!(summary.failures, 1);
    let warnings = recorder
        .0
        .lock()
        .unwrap()
        .iter()
        .filter(|level| **level == Level::WARN)
        .count();
    assert_eq!(warnings, 1);
}
