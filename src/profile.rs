//! The request-scoped view of a GitHub user, shaped after the GraphQL query in
//! [`crate::github::PROFILE_QUERY`]. Nothing here outlives a single request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// GraphQL lists may be `null` and may contain `null` entries; both collapse away.
fn nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
  Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub login: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub bio: Option<String>,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub avatar_url: Option<String>,
  #[serde(default)]
  pub website_url: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub followers: TotalCount,
  #[serde(default, deserialize_with = "nullable")]
  pub following: TotalCount,
  #[serde(default, deserialize_with = "nullable")]
  pub gists: TotalCount,
  #[serde(default, deserialize_with = "nullable")]
  pub contributions_collection: ContributionsCollection,
  /// The self-named `<login>/<login>` profile repository, when it exists.
  #[serde(default)]
  pub repository: Option<ProfileRepository>,
  #[serde(default, deserialize_with = "nullable")]
  pub repositories: Connection<Repository>,
  #[serde(default, deserialize_with = "nullable")]
  pub pull_requests: Connection<PullRequest>,
}

impl UserProfile {
  /// Owned repositories that still count towards scoring.
  pub fn active_repositories(&self) -> Vec<&Repository> {
    self
      .repositories
      .nodes
      .iter()
      .filter(|repo| !repo.is_archived)
      .collect()
  }

  pub fn has_profile_readme(&self) -> bool {
    self
      .repository
      .as_ref()
      .is_some_and(|repo| is_blob(repo.readme.as_ref()))
  }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
  #[serde(default)]
  pub total_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
  #[serde(default)]
  pub total_count: u64,
  #[serde(default = "Vec::new", deserialize_with = "nodes")]
  pub nodes: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
  #[serde(default, deserialize_with = "nullable")]
  pub contribution_calendar: ContributionCalendar,
  #[serde(default, deserialize_with = "nullable")]
  pub total_commit_contributions: u64,
  #[serde(default, deserialize_with = "nullable")]
  pub total_issue_contributions: u64,
  #[serde(default, deserialize_with = "nullable")]
  pub total_pull_request_contributions: u64,
  #[serde(default, deserialize_with = "nullable")]
  pub total_pull_request_review_contributions: u64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
  #[serde(default)]
  pub total_contributions: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRepository {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub readme: Option<GitObject>,
}

/// `object(expression: "HEAD:README.md")` resolves to a `Blob` when the file exists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitObject {
  #[serde(rename = "__typename", default)]
  pub typename: String,
}

fn is_blob(object: Option<&GitObject>) -> bool {
  object.is_some_and(|object| object.typename == "Blob")
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub url: String,
  #[serde(default, deserialize_with = "nullable")]
  pub stargazer_count: u64,
  #[serde(default, deserialize_with = "nullable")]
  pub fork_count: u64,
  #[serde(default)]
  pub primary_language: Option<Language>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub pushed_at: Option<DateTime<Utc>>,
  #[serde(default, deserialize_with = "nullable")]
  pub has_issues_enabled: bool,
  #[serde(default, deserialize_with = "nullable")]
  pub is_archived: bool,
  #[serde(default)]
  pub homepage_url: Option<String>,
  #[serde(default)]
  pub readme: Option<GitObject>,
}

impl Repository {
  pub fn has_readme(&self) -> bool {
    is_blob(self.readme.as_ref())
  }

  pub fn has_homepage(&self) -> bool {
    self.homepage_url.as_deref().is_some_and(|url| !url.is_empty())
  }

  pub fn language(&self) -> Option<&str> {
    self.primary_language.as_ref().map(|lang| lang.name.as_str())
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Language {
  pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
  pub repository: PullRequestRepository,
  #[serde(default)]
  pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestRepository {
  pub owner: Owner,
  pub name: String,
  #[serde(default, deserialize_with = "nullable")]
  pub is_private: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Owner {
  pub login: String,
}
