use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Every way a score request can fail. Each variant is terminal for the request.
#[derive(Error, Debug)]
pub enum ScoreError {
  #[error("Unauthorized - Please sign in with GitHub")]
  Authentication,

  #[error("{0}")]
  Validation(String),

  #[error("User not found or invalid response from GitHub: {0}")]
  NotFound(String),

  #[error("Error fetching data from GitHub: {0}")]
  Upstream(String),

  /// Only for failures building the client; request failures become `Authentication` or `Upstream`.
  #[error("Unable to set up the GitHub client: {0}")]
  GitHub(#[from] octocrab::Error),

  #[error("Unexpected response shape from GitHub: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;

impl ResponseError for ScoreError {
  fn status_code(&self) -> StatusCode {
    match self {
      ScoreError::Authentication => StatusCode::UNAUTHORIZED,
      ScoreError::Validation(_) => StatusCode::BAD_REQUEST,
      ScoreError::NotFound(_) => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    HttpResponse::build(self.status_code()).json(json!({
      "success": false,
      "message": self.to_string(),
    }))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn statuses_follow_the_taxonomy() {
    assert_eq!(ScoreError::Authentication.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
      ScoreError::Validation("Target username is required".into()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ScoreError::NotFound("ghost".into()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ScoreError::Upstream("boom".into()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn malformed_json_is_an_upstream_failure() {
    let err: ScoreError = serde_json::from_str::<serde_json::Value>("{")
      .unwrap_err()
      .into();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
