//! Developer score: six independently capped categories summed into a card.
//!
//! Every scorer is a pure function of the profile and a reference instant, so
//! the same document always produces the same card.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::profile::{Repository, UserProfile};

pub mod completeness;
pub mod contributions;
pub mod diversity;
pub mod engagement;
pub mod presentation;
pub mod repo_quality;

pub type ScoreValue = u32;

pub const MIN_SCORE: ScoreValue = 0;
/// Sum of every category's maximum.
pub const MAX_TOTAL_SCORE: ScoreValue = 100;

/// A raw sub-metric reported next to a category score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Detail {
  Count(u64),
  Text(String),
  List(Vec<String>),
}

impl Detail {
  pub fn flag(present: bool) -> Detail {
    Detail::Text(if present { "Yes" } else { "No" }.to_string())
  }
}

impl From<u64> for Detail {
  fn from(value: u64) -> Self {
    Detail::Count(value)
  }
}

impl From<usize> for Detail {
  fn from(value: usize) -> Self {
    Detail::Count(value as u64)
  }
}

pub type Details = BTreeMap<&'static str, Detail>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCategory {
  pub category: &'static str,
  pub score: ScoreValue,
  pub max_score: ScoreValue,
  pub details: Details,
}

impl ScoreCategory {
  pub fn detail(&self, key: &str) -> Option<&Detail> {
    self.details.get(key)
  }
}

/// What every scorer gets to look at.
#[derive(Debug)]
pub struct ScoringContext<'a> {
  pub profile: &'a UserProfile,
  /// Owned, non-archived repositories.
  pub repos: Vec<&'a Repository>,
  pub now: DateTime<Utc>,
}

impl<'a> ScoringContext<'a> {
  pub fn new(profile: &'a UserProfile, now: DateTime<Utc>) -> Self {
    ScoringContext {
      profile,
      repos: profile.active_repositories(),
      now,
    }
  }
}

pub trait ScoringProvider {
  fn category(&self) -> &'static str;

  fn max_score(&self) -> ScoreValue;

  /// The uncapped category sum (inner terms already capped) and its sub-metrics.
  fn assess(&self, ctx: &ScoringContext) -> (f64, Details);

  fn score(&self, ctx: &ScoringContext) -> ScoreCategory {
    let max_score = self.max_score();
    let (raw, details) = self.assess(ctx);
    ScoreCategory {
      category: self.category(),
      score: round_capped(raw, max_score),
      max_score,
      details,
    }
  }
}

/// Cap the category sum at its maximum, then round to the nearest point.
pub fn round_capped(raw: f64, max_score: ScoreValue) -> ScoreValue {
  let capped = raw.min(max_score as f64).max(MIN_SCORE as f64);
  capped.round() as ScoreValue
}

/// `count / max(total, 1)`, so an empty account never divides by zero.
pub fn ratio(count: usize, total: usize) -> f64 {
  count as f64 / total.max(1) as f64
}

pub fn score_providers() -> Vec<Box<dyn ScoringProvider>> {
  vec![
    Box::new(contributions::OpenSourceContributions),
    Box::new(repo_quality::RepositoryQuality),
    Box::new(presentation::ProjectPresentation),
    Box::new(diversity::TechnicalDiversity),
    Box::new(engagement::CommunityEngagement),
    Box::new(completeness::ProfileCompleteness),
  ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
  pub total_score: ScoreValue,
  pub max_total_score: ScoreValue,
  pub percentage: ScoreValue,
  pub categories: Vec<ScoreCategory>,
}

impl ScoreCard {
  pub fn from_categories(categories: Vec<ScoreCategory>) -> ScoreCard {
    let total_score: ScoreValue = categories.iter().map(|c| c.score).sum();
    let max_total_score: ScoreValue = categories.iter().map(|c| c.max_score).sum();
    ScoreCard {
      total_score,
      max_total_score,
      percentage: percentage(total_score, max_total_score),
      categories,
    }
  }

  pub fn category(&self, name: &str) -> Option<&ScoreCategory> {
    self.categories.iter().find(|c| c.category == name)
  }
}

pub fn percentage(total: ScoreValue, max_total: ScoreValue) -> ScoreValue {
  if max_total == 0 {
    return MIN_SCORE;
  }
  (total as f64 / max_total as f64 * 100.0).round() as ScoreValue
}

/// Score a fetched profile as of `now`.
pub fn score_profile(profile: &UserProfile, now: DateTime<Utc>) -> ScoreCard {
  let ctx = ScoringContext::new(profile, now);
  let categories = score_providers()
    .iter()
    .map(|provider| provider.score(&ctx))
    .collect();
  ScoreCard::from_categories(categories)
}
