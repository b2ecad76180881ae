use std::collections::HashSet;

use super::{Detail, Details, ScoreValue, ScoringContext, ScoringProvider};

pub const CATEGORY: &str = "Technical Diversity";
pub const MAX_SCORE: ScoreValue = 10;

const LANGUAGE_WEIGHT: f64 = 2.5;

pub struct TechnicalDiversity;

impl ScoringProvider for TechnicalDiversity {
  fn category(&self) -> &'static str {
    CATEGORY
  }

  fn max_score(&self) -> ScoreValue {
    MAX_SCORE
  }

  fn assess(&self, ctx: &ScoringContext) -> (f64, Details) {
    // first-seen order
    let mut seen = HashSet::new();
    let languages: Vec<String> = ctx
      .repos
      .iter()
      .filter_map(|repo| repo.language())
      .filter(|name| seen.insert(*name))
      .map(str::to_string)
      .collect();

    let raw = languages.len() as f64 * LANGUAGE_WEIGHT;

    let details = Details::from([
      ("languageCount", languages.len().into()),
      ("programmingLanguages", Detail::List(languages)),
    ]);

    (raw, details)
  }
}
