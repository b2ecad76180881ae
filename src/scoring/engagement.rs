use super::{Details, ScoreValue, ScoringContext, ScoringProvider};

pub const CATEGORY: &str = "Community Engagement";
pub const MAX_SCORE: ScoreValue = 15;

const FOLLOWER_WEIGHT: f64 = 0.2;
const FOLLOWER_CAP: f64 = 3.0;
const ISSUE_WEIGHT: f64 = 0.4;
const ISSUE_CAP: f64 = 9.0;
const GIST_WEIGHT: f64 = 0.5;
const GIST_CAP: f64 = 3.0;

pub struct CommunityEngagement;

impl ScoringProvider for CommunityEngagement {
  fn category(&self) -> &'static str {
    CATEGORY
  }

  fn max_score(&self) -> ScoreValue {
    MAX_SCORE
  }

  fn assess(&self, ctx: &ScoringContext) -> (f64, Details) {
    let profile = ctx.profile;
    let followers = profile.followers.total_count;
    let issues = profile.contributions_collection.total_issue_contributions;
    let gists = profile.gists.total_count;

    let raw = (followers as f64 * FOLLOWER_WEIGHT).min(FOLLOWER_CAP)
      + (issues as f64 * ISSUE_WEIGHT).min(ISSUE_CAP)
      + (gists as f64 * GIST_WEIGHT).min(GIST_CAP);

    let details = Details::from([
      ("followers", followers.into()),
      ("following", profile.following.total_count.into()),
      ("issueContributions", issues.into()),
      ("gists", gists.into()),
    ]);

    (raw, details)
  }
}
