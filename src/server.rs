use std::sync::Arc;

use actix_web::{http::header, middleware::Logger, web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::Utc;
use log::*;
use serde::Deserialize;
use serde_json::json;

use crate::config::Settings;
use crate::error::{Result, ScoreError};
use crate::github::{GitHubSource, ProfileSource};
use crate::report::{Envelope, ScoreReport};

#[derive(Clone)]
pub struct AppState {
  pub source: Arc<dyn ProfileSource>,
}

impl AppState {
  pub fn new(source: Arc<dyn ProfileSource>) -> Self {
    AppState { source }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetQuery {
  target_username: Option<String>,
}

/// The session layer hands us the signed-in user's GitHub token as a bearer credential.
fn bearer_token(req: &HttpRequest) -> Result<&str> {
  let value = req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .ok_or(ScoreError::Authentication)?;

  let (scheme, token) = value.split_once(' ').ok_or(ScoreError::Authentication)?;
  let token = token.trim();
  if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
    return Err(ScoreError::Authentication);
  }

  Ok(token)
}

fn target_username(req: &HttpRequest) -> Result<String> {
  let missing = || ScoreError::Validation("Target username is required".to_string());

  let query = web::Query::<TargetQuery>::from_query(req.query_string()).map_err(|_| missing())?;
  query
    .into_inner()
    .target_username
    .filter(|name| !name.is_empty())
    .ok_or_else(missing)
}

pub async fn calculate_score(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
  let token = bearer_token(&req)?;
  let username = target_username(&req)?;

  let profile = state.source.fetch_profile(token, &username).await?;
  let report = ScoreReport::build(&username, &profile, Utc::now());
  info!(
    "Scored {}: {}/{} ({}%)",
    username, report.card.total_score, report.card.max_total_score, report.card.percentage
  );

  Ok(HttpResponse::Ok().json(Envelope::ok(report)))
}

pub async fn get_user_data(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
  let token = bearer_token(&req)?;
  let username = target_username(&req)?;

  let top = state.source.fetch_top_repositories(token, &username).await?;

  Ok(HttpResponse::Ok().json(Envelope::ok(top)))
}

pub async fn health() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "success": true }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/calculate-score", web::get().to(calculate_score))
      .route("/get-user-data", web::get().to(get_user_data))
      .route("/health", web::get().to(health)),
  );
}

pub async fn run(settings: &Settings) -> std::io::Result<()> {
  let source: Arc<dyn ProfileSource> = Arc::new(GitHubSource::new(settings.api_url.clone()));
  let state = web::Data::new(AppState::new(source));

  let (bind, port) = settings.address();
  info!("Listening on {}:{} (GitHub API at {})", bind, port, settings.api_url);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .app_data(state.clone())
      .configure(configure)
  })
  .bind((bind, port))?
  .run()
  .await
}
