use clap::Args;
use log::*;

use crate::github::DEFAULT_API_URL;

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings. Flags win over environment variables, which win over `.env`.
#[derive(Args, Debug, Clone)]
pub struct Settings {
  /// Which address should the server listen on?
  #[arg(long, env = "SCORE_BIND", default_value = DEFAULT_BIND)]
  pub bind: String,

  /// Which port should the server listen on?
  #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
  pub port: u16,

  /// Where does the GitHub API live?
  #[arg(long = "github-api", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
  pub api_url: String,
}

impl Settings {
  pub fn address(&self) -> (String, u16) {
    (self.bind.clone(), self.port)
  }
}

impl Default for Settings {
  fn default() -> Self {
    Settings {
      bind: DEFAULT_BIND.to_string(),
      port: DEFAULT_PORT,
      api_url: DEFAULT_API_URL.to_string(),
    }
  }
}

/// Load `.env` into the process environment. Must run before argument parsing
/// so `env` fallbacks can see the values.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
  dotenvy::dotenv().ok()
}

pub fn report_dotenv(loaded: Option<&std::path::Path>) {
  match loaded {
    Some(path) => debug!("Loaded environment from {}", path.display()),
    None => debug!("No .env file found, using process environment only."),
  }
}
