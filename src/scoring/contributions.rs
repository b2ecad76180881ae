use std::collections::HashSet;

use super::{Details, ScoreValue, ScoringContext, ScoringProvider};
use crate::profile::PullRequest;

pub const CATEGORY: &str = "Open Source Contributions";
pub const MAX_SCORE: ScoreValue = 25;

const EXTERNAL_PR_WEIGHT: f64 = 0.5;
const EXTERNAL_REPO_WEIGHT: f64 = 1.0;
const PR_CONTRIBUTION_WEIGHT: f64 = 0.1;
const CALENDAR_WEIGHT: f64 = 0.1;
const CALENDAR_CAP: f64 = 5.0;

/// Merged pull requests into public repositories someone else owns.
pub fn external_pull_requests<'a>(login: &str, prs: &'a [PullRequest]) -> Vec<&'a PullRequest> {
  prs
    .iter()
    .filter(|pr| pr.repository.owner.login != login && !pr.repository.is_private)
    .collect()
}

pub struct OpenSourceContributions;

impl ScoringProvider for OpenSourceContributions {
  fn category(&self) -> &'static str {
    CATEGORY
  }

  fn max_score(&self) -> ScoreValue {
    MAX_SCORE
  }

  fn assess(&self, ctx: &ScoringContext) -> (f64, Details) {
    let profile = ctx.profile;
    let contributions = &profile.contributions_collection;

    let external = external_pull_requests(&profile.login, &profile.pull_requests.nodes);
    let unique_repos: HashSet<(&str, &str)> = external
      .iter()
      .map(|pr| (pr.repository.owner.login.as_str(), pr.repository.name.as_str()))
      .collect();

    let pr_contributions = contributions.total_pull_request_contributions;
    let calendar_total = contributions.contribution_calendar.total_contributions;

    let raw = external.len() as f64 * EXTERNAL_PR_WEIGHT
      + unique_repos.len() as f64 * EXTERNAL_REPO_WEIGHT
      + pr_contributions as f64 * PR_CONTRIBUTION_WEIGHT
      + (calendar_total as f64 * CALENDAR_WEIGHT).min(CALENDAR_CAP);

    let details = Details::from([
      ("externalPRsMerged", external.len().into()),
      ("uniqueReposContributed", unique_repos.len().into()),
      ("totalPRContributions", pr_contributions.into()),
      ("totalCommitContributionsLastYear", calendar_total.into()),
    ]);

    (raw, details)
  }
}
