use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::profile::UserProfile;
use crate::scoring::{score_profile, ScoreCard};

/// The body returned to callers on success.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
  pub success: bool,
  pub data: T,
}

impl<T: Serialize> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Envelope { success: true, data }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
  pub name: Option<String>,
  pub bio: Option<String>,
  pub location: Option<String>,
  pub avatar_url: Option<String>,
  pub followers: u64,
  pub following: u64,
}

impl From<&UserProfile> for ProfileSummary {
  fn from(profile: &UserProfile) -> Self {
    ProfileSummary {
      name: profile.name.clone(),
      bio: profile.bio.clone(),
      location: profile.location.clone(),
      avatar_url: profile.avatar_url.clone(),
      followers: profile.followers.total_count,
      following: profile.following.total_count,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
  /// The login exactly as the caller asked for it.
  pub username: String,
  #[serde(flatten)]
  pub card: ScoreCard,
  pub profile_data: ProfileSummary,
}

impl ScoreReport {
  pub fn build(username: &str, profile: &UserProfile, now: DateTime<Utc>) -> ScoreReport {
    ScoreReport {
      username: username.to_string(),
      card: score_profile(profile, now),
      profile_data: profile.into(),
    }
  }
}
