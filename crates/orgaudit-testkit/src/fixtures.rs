//! JSON payloads shaped like GitHub REST API responses

use serde_json::{Value, json};

/// `/user/orgs` entries
pub fn orgs_json(logins: &[&str]) -> String {
    let items: Vec<Value> = logins
        .iter()
        .enumerate()
        .map(|(i, login)| json!({ "login": login, "id": i + 1, "description": null }))
        .collect();
    Value::Array(items).to_string()
}

/// One page of `/orgs/{org}/repos`
pub fn repos_json(names: &[&str]) -> String {
    let items: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": i + 1, "name": name, "private": false }))
        .collect();
    Value::Array(items).to_string()
}

/// Repositories named `{prefix}-{n}` for `n` in `range`
pub fn numbered_repos_json(prefix: &str, range: std::ops::Range<usize>) -> String {
    let names: Vec<String> = range.map(|n| format!("{prefix}-{n}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    repos_json(&refs)
}

/// A collaborator entry with the given capability flags
pub fn collaborator(login: &str, admin: bool, maintain: bool, push: bool, triage: bool, pull: bool) -> Value {
    json!({
        "login": login,
        "type": "User",
        "permissions": {
            "admin": admin,
            "maintain": maintain,
            "push": push,
            "triage": triage,
            "pull": pull
        }
    })
}

/// Collaborator with write access (push + triage + pull)
pub fn writer(login: &str) -> Value {
    collaborator(login, false, false, true, true, true)
}

/// Collaborator with read access only
pub fn reader(login: &str) -> Value {
    collaborator(login, false, false, false, false, true)
}

/// Serializes a list of collaborator entries
pub fn collaborators_json(entries: &[Value]) -> String {
    Value::Array(entries.to_vec()).to_string()
}

/// `/users/{username}` profile; `email` may be absent
pub fn user_json(login: &str, email: Option<&str>) -> String {
    json!({ "login": login, "name": null, "email": email }).to_string()
}

/// A `PushEvent` whose commits carry the given author emails
pub fn push_event(author_emails: &[&str]) -> Value {
    let commits: Vec<Value> = author_emails
        .iter()
        .map(|email| json!({ "sha": "0000000", "author": { "email": email, "name": "dev" }, "message": "wip" }))
        .collect();
    json!({ "type": "PushEvent", "payload": { "commits": commits } })
}

/// A non-push event (ignored by email resolution)
pub fn watch_event() -> Value {
    json!({ "type": "WatchEvent", "payload": { "action": "started" } })
}

/// Serializes an event timeline
pub fn events_json(events: &[Value]) -> String {
    Value::Array(events.to_vec()).to_string()
}
