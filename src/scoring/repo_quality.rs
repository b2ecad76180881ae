use chrono::{DateTime, Months, Utc};

use super::{Details, ScoreValue, ScoringContext, ScoringProvider};
use crate::profile::Repository;

pub const CATEGORY: &str = "Repository Quality";
pub const MAX_SCORE: ScoreValue = 20;

/// A repository pushed within this many calendar months counts as active.
pub const RECENT_MONTHS: u32 = 6;

const STAR_WEIGHT: f64 = 0.1;
const STAR_CAP: f64 = 8.0;
const FORK_WEIGHT: f64 = 0.2;
const FORK_CAP: f64 = 4.0;
const REPO_WEIGHT: f64 = 0.5;
const REPO_CAP: f64 = 4.0;
const RECENT_WEIGHT: f64 = 0.8;
const RECENT_CAP: f64 = 4.0;

pub fn recent_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
  now
    .checked_sub_months(Months::new(RECENT_MONTHS))
    .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Pushed strictly after the cutoff. Never-pushed repositories are not recent.
pub fn is_recent(repo: &Repository, cutoff: DateTime<Utc>) -> bool {
  repo.pushed_at.is_some_and(|pushed| pushed > cutoff)
}

pub struct RepositoryQuality;

impl ScoringProvider for RepositoryQuality {
  fn category(&self) -> &'static str {
    CATEGORY
  }

  fn max_score(&self) -> ScoreValue {
    MAX_SCORE
  }

  fn assess(&self, ctx: &ScoringContext) -> (f64, Details) {
    let stars: u64 = ctx.repos.iter().map(|repo| repo.stargazer_count).sum();
    let forks: u64 = ctx.repos.iter().map(|repo| repo.fork_count).sum();
    let cutoff = recent_cutoff(ctx.now);
    let recent = ctx.repos.iter().filter(|repo| is_recent(repo, cutoff)).count();

    let raw = (stars as f64 * STAR_WEIGHT).min(STAR_CAP)
      + (forks as f64 * FORK_WEIGHT).min(FORK_CAP)
      + (ctx.repos.len() as f64 * REPO_WEIGHT).min(REPO_CAP)
      + (recent as f64 * RECENT_WEIGHT).min(RECENT_CAP);

    let details = Details::from([
      ("totalRepositoriesOwned", ctx.repos.len().into()),
      ("totalStars", stars.into()),
      ("totalForks", forks.into()),
      ("recentlyActiveRepos", recent.into()),
    ]);

    (raw, details)
  }
}
