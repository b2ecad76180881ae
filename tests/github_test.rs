mod common;

use common::user;
use developer_score::error::ScoreError;
use developer_score::github::{
  interpret, rank_by_commits, CommitHistoryRepository, GraphQlResponse, UserData,
};
use developer_score::profile::UserProfile;
use serde_json::{json, Value};

fn interpret_profile(body: Value) -> Result<UserProfile, ScoreError> {
  let response: GraphQlResponse<UserData<UserProfile>> =
    serde_json::from_value(body).expect("body should match the envelope");
  interpret(response, "octocat")
}

#[test]
fn test_user_without_errors() {
  let result = interpret_profile(json!({ "data": { "user": user(vec![], vec![]) } }));

  let profile = result.expect("profile should be returned");
  assert_eq!(profile.login, "octocat");
}

#[test]
fn test_unknown_user_is_not_found() {
  let result = interpret_profile(json!({
    "data": { "user": null },
    "errors": [{
      "type": "NOT_FOUND",
      "path": ["user"],
      "message": "Could not resolve to a User with the login of 'ghost'."
    }]
  }));

  assert!(matches!(result, Err(ScoreError::NotFound(login)) if login == "octocat"));
}

#[test]
fn test_empty_body_is_not_found() {
  assert!(matches!(interpret_profile(json!({})), Err(ScoreError::NotFound(_))));
  assert!(matches!(
    interpret_profile(json!({ "data": null })),
    Err(ScoreError::NotFound(_))
  ));
}

#[test]
fn test_errors_without_user_are_upstream_failures() {
  let result = interpret_profile(json!({
    "data": null,
    "errors": [{ "type": "RATE_LIMITED", "message": "API rate limit exceeded" }]
  }));

  assert!(matches!(result, Err(ScoreError::Upstream(message)) if message.contains("rate limit")));
}

#[test]
fn test_missing_profile_repository_is_tolerated() {
  let result = interpret_profile(json!({
    "data": { "user": user(vec![], vec![]) },
    "errors": [{
      "type": "NOT_FOUND",
      "path": ["user", "repository"],
      "message": "Could not resolve to a Repository with the name 'octocat/octocat'."
    }]
  }));

  let profile = result.expect("missing profile repository should not abort");
  assert!(!profile.has_profile_readme());
}

#[test]
fn test_other_errors_next_to_a_user_abort() {
  let result = interpret_profile(json!({
    "data": { "user": user(vec![], vec![]) },
    "errors": [
      {
        "type": "NOT_FOUND",
        "path": ["user", "repository"],
        "message": "Could not resolve to a Repository with the name 'octocat/octocat'."
      },
      {
        "type": "FORBIDDEN",
        "path": ["user", "contributionsCollection"],
        "message": "Resource not accessible by integration"
      }
    ]
  }));

  match result {
    Err(ScoreError::Upstream(message)) => {
      assert_eq!(message, "Resource not accessible by integration");
    }
    other => panic!("expected an upstream failure, got {:?}", other),
  }
}

fn history_repo(name: &str, commits: Option<u64>) -> Value {
  let branch = commits.map(|count| json!({ "target": { "history": { "totalCount": count } } }));
  json!({
    "name": name,
    "url": format!("https://github.com/octocat/{}", name),
    "defaultBranchRef": branch
  })
}

#[test]
fn test_rank_by_commits() {
  let repos: Vec<CommitHistoryRepository> = serde_json::from_value(json!([
    history_repo("a", Some(3)),
    history_repo("empty", None),
    history_repo("b", Some(40)),
    history_repo("c", Some(12)),
    history_repo("d", Some(12)),
    history_repo("e", Some(1)),
    history_repo("f", Some(7)),
  ]))
  .unwrap();

  let ranked = rank_by_commits(repos);
  let names: Vec<&str> = ranked.iter().map(|repo| repo.name.as_str()).collect();

  assert_eq!(names, vec!["b", "c", "d", "f", "a"]);
  assert_eq!(ranked[0].commits_by_user, 40);
  assert_eq!(ranked[0].url, "https://github.com/octocat/b");
}
