use chrono::Utc;
use clap::{Parser, Subcommand};
use developer_score::{
  config::{self, Settings},
  github::{GitHubSource, ProfileSource, DEFAULT_API_URL},
  report::{Envelope, ScoreReport},
  server,
};

use log::*;

use simplelog::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scores a GitHub developer profile", arg_required_else_help(true))]
struct Opts {
  /// Would you like to enable debug information?
  #[arg(short = 'd', long, default_value_t = false, global = true)]
  debug: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Serve the scoring API over HTTP.
  Serve(Settings),

  /// Score a single user and print the result as JSON.
  Score {
    /// Whose profile should be scored?
    login: String,

    /// Which GitHub token should the request be made with?
    #[arg(short = 't', long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Where does the GitHub API live?
    #[arg(long = "github-api", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
  },
}

async fn score_one(login: &str, token: &str, api_url: &str) -> Result<String, Box<dyn std::error::Error>> {
  let source = GitHubSource::new(api_url);
  let profile = source.fetch_profile(token, login).await?;
  let report = ScoreReport::build(login, &profile, Utc::now());
  Ok(serde_json::to_string_pretty(&Envelope::ok(report))?)
}

#[tokio::main]
async fn main() {
  let dotenv = config::load_dotenv();
  let opts = Opts::parse();

  let log_level = if opts.debug {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };

  if let Err(e) = TermLogger::init(
    log_level,
    Config::default(),
    TerminalMode::Mixed,
    ColorChoice::Auto,
  ) {
    eprintln!("Failed to initialize logger: {:?}", e);
    std::process::exit(1);
  }

  debug!("DEBUG ENABLED");
  config::report_dotenv(dotenv.as_deref());

  match opts.command {
    Command::Serve(settings) => {
      if let Err(e) = server::run(&settings).await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
      }
    }
    Command::Score {
      login,
      token,
      api_url,
    } => match score_one(&login, &token, &api_url).await {
      Ok(rendered) => println!("{}", rendered),
      Err(e) => {
        error!("Unable to score {}: {}", login, e);
        std::process::exit(1);
      }
    },
  }
}
