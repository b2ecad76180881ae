use super::{ratio, Details, ScoreValue, ScoringContext, ScoringProvider};
use crate::profile::Repository;

pub const CATEGORY: &str = "Project Presentation";
pub const MAX_SCORE: ScoreValue = 20;

/// Descriptions this short or shorter don't count. Measured in UTF-16 code units.
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

const DESCRIPTION_SCALE: f64 = 5.0;
const README_SCALE: f64 = 5.0;
const HOMEPAGE_SCALE: f64 = 10.0;

pub fn has_description(repo: &Repository) -> bool {
  repo
    .description
    .as_deref()
    .is_some_and(|text| text.encode_utf16().count() > MIN_DESCRIPTION_LENGTH)
}

pub struct ProjectPresentation;

impl ScoringProvider for ProjectPresentation {
  fn category(&self) -> &'static str {
    CATEGORY
  }

  fn max_score(&self) -> ScoreValue {
    MAX_SCORE
  }

  fn assess(&self, ctx: &ScoringContext) -> (f64, Details) {
    let total = ctx.repos.len();
    let described = ctx.repos.iter().filter(|repo| has_description(repo)).count();
    let with_readme = ctx.repos.iter().filter(|repo| repo.has_readme()).count();
    let with_homepage = ctx.repos.iter().filter(|repo| repo.has_homepage()).count();

    let raw = (ratio(described, total) * DESCRIPTION_SCALE).min(DESCRIPTION_SCALE)
      + (ratio(with_readme, total) * README_SCALE).min(README_SCALE)
      + (ratio(with_homepage, total) * HOMEPAGE_SCALE).min(HOMEPAGE_SCALE);

    let details = Details::from([
      ("projectReposWithDescription", described.into()),
      ("projectReposWithReadme", with_readme.into()),
      ("projectReposWithLiveLink", with_homepage.into()),
    ]);

    (raw, details)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn described(text: &str) -> Repository {
    Repository {
      name: "demo".into(),
      description: Some(text.into()),
      ..Default::default()
    }
  }

  #[test]
  fn description_length_counts_utf16_units() {
    // six emoji are twelve UTF-16 units
    assert!(has_description(&described("🚀🚀🚀🚀🚀🚀")));
    assert!(!has_description(&described("ten chars!")));
    assert!(has_description(&described("eleven char")));
    assert!(!has_description(&Repository::default()));
  }
}
