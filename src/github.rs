use async_trait::async_trait;
use log::*;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Result, ScoreError};
use crate::profile::{Connection, TotalCount, UserProfile};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Everything the score calculator reads, in one round trip.
pub const PROFILE_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    id
    login
    name
    bio
    location
    avatarUrl
    websiteUrl
    createdAt
    updatedAt
    followers { totalCount }
    following { totalCount }
    gists(privacy: PUBLIC) { totalCount }
    contributionsCollection {
      contributionCalendar {
        totalContributions
      }
      totalCommitContributions
      totalIssueContributions
      totalPullRequestContributions
      totalPullRequestReviewContributions
    }
    repository(name: $login) {
      name
      readme: object(expression: "HEAD:README.md") {
        __typename
      }
    }
    repositories(first: 100, privacy: PUBLIC, ownerAffiliations: [OWNER], isFork: false) {
      totalCount
      nodes {
        name
        description
        url
        stargazerCount
        forkCount
        primaryLanguage { name }
        createdAt
        pushedAt
        hasIssuesEnabled
        isArchived
        homepageUrl
        readme: object(expression: "HEAD:README.md") {
          __typename
        }
      }
    }
    pullRequests(first: 100, states: [MERGED]) {
      totalCount
      nodes {
        repository {
          owner { login }
          name
          isPrivate
        }
        mergedAt
      }
    }
  }
}
"#;

pub const USER_ID_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    id
  }
}
"#;

pub const COMMIT_HISTORY_QUERY: &str = r#"
query($login: String!, $authorId: ID!) {
  user(login: $login) {
    repositories(first: 100, orderBy: { field: PUSHED_AT, direction: DESC }, isFork: false, ownerAffiliations: [OWNER]) {
      totalCount
      nodes {
        name
        url
        defaultBranchRef {
          target {
            ... on Commit {
              history(author: { id: $authorId }) {
                totalCount
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// How many repositories the commit ranking returns.
pub const TOP_REPOSITORY_COUNT: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphQlResponse<T> {
  pub data: Option<T>,
  pub errors: Option<Vec<GraphQlError>>,
}

/// Every query here hangs off `user(login:)`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct UserData<T> {
  pub user: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
  #[serde(default)]
  pub message: String,
  #[serde(rename = "type", default)]
  pub kind: Option<String>,
  #[serde(default)]
  pub path: Option<Vec<serde_json::Value>>,
}

impl GraphQlError {
  fn is_not_found(&self) -> bool {
    self.kind.as_deref() == Some("NOT_FOUND")
  }

  /// The target simply has no `<login>/<login>` repository.
  fn is_missing_profile_repository(&self) -> bool {
    let path_matches = self.path.as_ref().is_some_and(|path| {
      path.len() == 2 && path[0] == "user" && path[1] == "repository"
    });
    self.is_not_found() && path_matches
  }
}

fn joined_messages(errors: &[GraphQlError]) -> String {
  errors
    .iter()
    .map(|err| err.message.as_str())
    .collect::<Vec<_>>()
    .join("; ")
}

/// Turn a GraphQL body into the requested user, or a typed failure.
///
/// A missing profile repository is the only error tolerated next to a user
/// object. Anything else aborts so a partial document never reaches scoring.
pub fn interpret<T>(response: GraphQlResponse<UserData<T>>, login: &str) -> Result<T> {
  let errors = response.errors.unwrap_or_default();
  let user = response.data.and_then(|data| data.user);

  let Some(user) = user else {
    if errors.is_empty() || errors.iter().any(GraphQlError::is_not_found) {
      return Err(ScoreError::NotFound(login.to_string()));
    }
    return Err(ScoreError::Upstream(joined_messages(&errors)));
  };

  let (tolerated, fatal): (Vec<_>, Vec<_>) = errors
    .into_iter()
    .partition(GraphQlError::is_missing_profile_repository);

  for err in &tolerated {
    debug!("Ignoring GraphQL error for {}: {}", login, err.message);
  }

  if !fatal.is_empty() {
    warn!("GraphQL errors for {}: {}", login, joined_messages(&fatal));
    return Err(ScoreError::Upstream(joined_messages(&fatal)));
  }

  Ok(user)
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserNode {
  pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitHistoryUser {
  #[serde(default)]
  pub repositories: Option<Connection<CommitHistoryRepository>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitHistoryRepository {
  pub name: String,
  #[serde(default)]
  pub url: String,
  #[serde(default)]
  pub default_branch_ref: Option<BranchRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchRef {
  #[serde(default)]
  pub target: Option<CommitTarget>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitTarget {
  #[serde(default)]
  pub history: Option<TotalCount>,
}

impl CommitHistoryRepository {
  fn commits_by_user(&self) -> Option<u64> {
    self
      .default_branch_ref
      .as_ref()
      .and_then(|branch| branch.target.as_ref())
      .and_then(|target| target.history)
      .map(|history| history.total_count)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRepository {
  pub name: String,
  pub url: String,
  pub commits_by_user: u64,
}

/// Rank repositories by the user's own commits on the default branch.
/// Repositories without a history (empty, no default branch) are dropped.
pub fn rank_by_commits(repos: Vec<CommitHistoryRepository>) -> Vec<TopRepository> {
  let mut ranked: Vec<TopRepository> = repos
    .into_iter()
    .filter_map(|repo| {
      let commits_by_user = repo.commits_by_user()?;
      Some(TopRepository {
        name: repo.name,
        url: repo.url,
        commits_by_user,
      })
    })
    .collect();

  ranked.sort_by(|a, b| b.commits_by_user.cmp(&a.commits_by_user));
  ranked.truncate(TOP_REPOSITORY_COUNT);
  ranked
}

fn error_chain(err: &dyn std::error::Error) -> String {
  let mut parts = vec![err.to_string()];
  let mut cause = err.source();
  while let Some(inner) = cause {
    parts.push(inner.to_string());
    cause = inner.source();
  }
  parts.join(": ")
}

/// Map a failed round trip onto the request's error taxonomy. octocrab's own
/// `Display` for an HTTP error is just the variant name, so the message GitHub
/// sent back is pulled out here.
pub fn request_failure(err: octocrab::Error) -> ScoreError {
  match &err {
    octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 401 => {
      warn!("GitHub rejected the token: {}", source.message);
      ScoreError::Authentication
    }
    octocrab::Error::GitHub { source, .. } => ScoreError::Upstream(format!(
      "{} (HTTP {})",
      source.message,
      source.status_code.as_u16()
    )),
    _ => ScoreError::Upstream(error_chain(&err)),
  }
}

/// Where profiles come from. The HTTP layer only sees this trait.
#[async_trait]
pub trait ProfileSource: Send + Sync {
  async fn fetch_profile(&self, token: &str, login: &str) -> Result<UserProfile>;

  async fn fetch_top_repositories(&self, token: &str, login: &str) -> Result<Vec<TopRepository>>;
}

/// The live GitHub GraphQL API, reached through octocrab.
#[derive(Debug, Clone)]
pub struct GitHubSource {
  api_url: String,
}

impl GitHubSource {
  pub fn new(api_url: impl Into<String>) -> Self {
    GitHubSource {
      api_url: api_url.into(),
    }
  }

  pub fn api_url(&self) -> &str {
    &self.api_url
  }

  /// This function returns an Octocrab instance acting as the signed-in user.
  /// Each query is sent once; octocrab's retry layer is switched off.
  pub fn octocrab_handle(&self, token: &str) -> Result<Octocrab> {
    let mut builder = Octocrab::builder();
    builder.add_retry_config(RetryConfig::None);
    let gh = builder
      .base_uri(self.api_url.as_str())?
      .personal_token(token.to_string())
      .build()?;
    Ok(gh)
  }

  async fn query<T>(&self, gh: &Octocrab, query: &str, variables: serde_json::Value) -> Result<GraphQlResponse<T>>
  where
    T: for<'de> Deserialize<'de>,
  {
    let body: serde_json::Value = gh
      .graphql(&json!({ "query": query, "variables": variables }))
      .await
      .map_err(|e| {
        let failure = request_failure(e);
        error!("GraphQL request to {} failed: {}", self.api_url, failure);
        failure
      })?;
    Ok(serde_json::from_value(body)?)
  }
}

impl Default for GitHubSource {
  fn default() -> Self {
    GitHubSource::new(DEFAULT_API_URL)
  }
}

#[async_trait]
impl ProfileSource for GitHubSource {
  async fn fetch_profile(&self, token: &str, login: &str) -> Result<UserProfile> {
    let gh = self.octocrab_handle(token)?;

    debug!("Fetching profile for {}", login);
    let response = self
      .query::<UserData<UserProfile>>(&gh, PROFILE_QUERY, json!({ "login": login }))
      .await?;
    let profile = interpret(response, login)?;
    debug!(
      "Fetched {}: {} repositories, {} merged pull requests",
      login,
      profile.repositories.nodes.len(),
      profile.pull_requests.nodes.len()
    );

    Ok(profile)
  }

  async fn fetch_top_repositories(&self, token: &str, login: &str) -> Result<Vec<TopRepository>> {
    let gh = self.octocrab_handle(token)?;

    let response = self
      .query::<UserData<UserNode>>(&gh, USER_ID_QUERY, json!({ "login": login }))
      .await?;
    let user = interpret(response, login)?;

    let response = self
      .query::<UserData<CommitHistoryUser>>(
        &gh,
        COMMIT_HISTORY_QUERY,
        json!({ "login": login, "authorId": user.id }),
      )
      .await?;
    let history = interpret(response, login)?;

    let repos = history
      .repositories
      .map(|connection| connection.nodes)
      .unwrap_or_default();
    debug!("Ranking {} repositories for {}", repos.len(), login);

    Ok(rank_by_commits(repos))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_profile_repository_error_matches_only_that_path() {
    let err: GraphQlError = serde_json::from_value(json!({
      "type": "NOT_FOUND",
      "path": ["user", "repository"],
      "message": "Could not resolve to a Repository with the name 'octocat/octocat'."
    }))
    .unwrap();
    assert!(err.is_missing_profile_repository());

    let err: GraphQlError = serde_json::from_value(json!({
      "type": "NOT_FOUND",
      "path": ["user"],
      "message": "Could not resolve to a User with the login of 'ghost'."
    }))
    .unwrap();
    assert!(!err.is_missing_profile_repository());
    assert!(err.is_not_found());
  }

  #[tokio::test]
  async fn octocrab_handle_accepts_a_custom_api_url() {
    let source = GitHubSource::new("http://localhost:8080");
    assert!(source.octocrab_handle("token").is_ok());
    assert_eq!(GitHubSource::default().api_url(), DEFAULT_API_URL);
  }
}
