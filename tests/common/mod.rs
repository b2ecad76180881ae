#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use developer_score::profile::UserProfile;
use serde_json::{json, Value};

/// Fixed reference instant so recency checks never drift.
pub fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> String {
  (now() - Duration::days(days)).to_rfc3339()
}

pub fn repo(name: &str, stars: u64, forks: u64, pushed_at: &str) -> Value {
  json!({
    "name": name,
    "description": null,
    "url": format!("https://github.com/octocat/{}", name),
    "stargazerCount": stars,
    "forkCount": forks,
    "primaryLanguage": null,
    "createdAt": "2020-01-01T00:00:00Z",
    "pushedAt": pushed_at,
    "hasIssuesEnabled": true,
    "isArchived": false,
    "homepageUrl": null,
    "readme": null
  })
}

pub fn merged_pr(owner: &str, name: &str, private: bool) -> Value {
  json!({
    "repository": { "owner": { "login": owner }, "name": name, "isPrivate": private },
    "mergedAt": "2025-01-01T00:00:00Z"
  })
}

/// A bare GraphQL `user` object; tests patch in whatever they need.
pub fn user(repos: Vec<Value>, prs: Vec<Value>) -> Value {
  let (repo_count, pr_count) = (repos.len(), prs.len());
  json!({
    "id": "MDQ6VXNlcjE=",
    "login": "octocat",
    "name": null,
    "bio": null,
    "location": null,
    "avatarUrl": "https://avatars.githubusercontent.com/u/583231",
    "websiteUrl": null,
    "followers": { "totalCount": 0 },
    "following": { "totalCount": 0 },
    "gists": { "totalCount": 0 },
    "contributionsCollection": {
      "contributionCalendar": { "totalContributions": 0 },
      "totalCommitContributions": 0,
      "totalIssueContributions": 0,
      "totalPullRequestContributions": 0,
      "totalPullRequestReviewContributions": 0
    },
    "repository": null,
    "repositories": { "totalCount": repo_count, "nodes": repos },
    "pullRequests": { "totalCount": pr_count, "nodes": prs }
  })
}

pub fn profile(user: Value) -> UserProfile {
  serde_json::from_value(user).expect("fixture should deserialize")
}
