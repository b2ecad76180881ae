use bitflags::bitflags;

use super::{Detail, Details, ScoreValue, ScoringContext, ScoringProvider};
use crate::profile::UserProfile;

pub const CATEGORY: &str = "Profile Completeness";
pub const MAX_SCORE: ScoreValue = 10;

const POINTS_PER_FIELD: ScoreValue = 2;

bitflags! {
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct ProfileFields: u8 {
    const NAME = 0b00001;
    const BIO = 0b00010;
    const LOCATION = 0b00100;
    const WEBSITE = 0b01000;
    const README = 0b10000;
  }
}

fn filled(field: &Option<String>) -> bool {
  field.as_deref().is_some_and(|value| !value.is_empty())
}

impl ProfileFields {
  pub fn of(profile: &UserProfile) -> ProfileFields {
    let mut fields = ProfileFields::empty();
    fields.set(ProfileFields::NAME, filled(&profile.name));
    fields.set(ProfileFields::BIO, filled(&profile.bio));
    fields.set(ProfileFields::LOCATION, filled(&profile.location));
    fields.set(ProfileFields::WEBSITE, filled(&profile.website_url));
    fields.set(ProfileFields::README, profile.has_profile_readme());
    fields
  }

  pub fn points(&self) -> ScoreValue {
    self.bits().count_ones() * POINTS_PER_FIELD
  }
}

pub struct ProfileCompleteness;

impl ScoringProvider for ProfileCompleteness {
  fn category(&self) -> &'static str {
    CATEGORY
  }

  fn max_score(&self) -> ScoreValue {
    MAX_SCORE
  }

  fn assess(&self, ctx: &ScoringContext) -> (f64, Details) {
    let fields = ProfileFields::of(ctx.profile);

    let details = Details::from([
      ("hasName", Detail::flag(fields.contains(ProfileFields::NAME))),
      ("hasBio", Detail::flag(fields.contains(ProfileFields::BIO))),
      ("hasLocation", Detail::flag(fields.contains(ProfileFields::LOCATION))),
      ("hasWebsite", Detail::flag(fields.contains(ProfileFields::WEBSITE))),
      ("hasReadme", Detail::flag(fields.contains(ProfileFields::README))),
    ]);

    (fields.points() as f64, details)
  }
}
