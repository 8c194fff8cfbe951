//! Pipeline configuration from environment variables (and `.env`)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::InsightsError;

pub const DEFAULT_BASE_URL: &str = "https://api.chess.com/pub";
pub const DEFAULT_USER_AGENT: &str = "ChessInsights/1.0";

#[derive(Clone, Debug)]
pub struct InsightsConfig {
    /// chess.com account every outcome is computed for
    pub username: String,

    /// Root of data/raw and data/processed
    pub data_dir: PathBuf,

    /// Root of reports/data and reports/figures
    pub reports_dir: PathBuf,

    /// Where trained models are written
    pub models_dir: PathBuf,

    pub base_url: String,
    pub user_agent: String,

    /// Pause before every API request
    pub request_delay: Duration,
    pub http_timeout: Duration,

    /// Openings with fewer games are left out of the win-rate report
    pub min_opening_games: usize,
}

impl InsightsConfig {
    /// Load configuration from the environment. `username` overrides
    /// `CHESS_USERNAME` when given (e.g. from a command-line flag).
    pub fn from_env(username: Option<String>) -> Result<Self, InsightsError> {
        let username = match username {
            Some(u) => u,
            None => env::var("CHESS_USERNAME")
                .map_err(|_| InsightsError::Config("CHESS_USERNAME not set"))?,
        };
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(InsightsError::Config("username is empty"));
        }

        let config = Self {
            username,
            data_dir: env_path("DATA_DIR", "data"),
            reports_dir: env_path("REPORTS_DIR", "reports"),
            models_dir: env_path("MODELS_DIR", "models"),
            base_url: env::var("CHESS_COM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            user_agent: env::var("CHESS_COM_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            request_delay: Duration::from_millis(env_parse("REQUEST_DELAY_MS", 100)?),
            http_timeout: Duration::from_secs(env_parse("HTTP_TIMEOUT_SECS", 30)?),
            min_opening_games: env_parse("MIN_OPENING_GAMES", 10)?,
        };
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Defaults for everything but the username; used by tests and library callers.
    pub fn for_user(username: &str) -> Self {
        Self {
            username: username.to_string(),
            data_dir: PathBuf::from("data"),
            reports_dir: PathBuf::from("reports"),
            models_dir: PathBuf::from("models"),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_delay: Duration::from_millis(100),
            http_timeout: Duration::from_secs(30),
            min_opening_games: 10,
        }
    }

    pub fn raw_games_path(&self) -> PathBuf {
        self.data_dir
            .join("raw")
            .join(format!("{}_raw_games.json", self.username))
    }

    pub fn processed_json_path(&self) -> PathBuf {
        self.data_dir
            .join("processed")
            .join(format!("{}_games.json", self.username))
    }

    pub fn processed_csv_path(&self) -> PathBuf {
        self.data_dir
            .join("processed")
            .join(format!("{}_games.csv", self.username))
    }

    pub fn openings_path(&self) -> PathBuf {
        self.data_dir.join("processed").join("chess_openings.txt")
    }

    pub fn figures_dir(&self) -> PathBuf {
        self.reports_dir.join("figures")
    }

    pub fn report_data_dir(&self) -> PathBuf {
        self.reports_dir.join("data")
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn env_parse<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, InsightsError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| InsightsError::InvalidSetting { key, value }),
        Err(_) => Ok(default),
    }
}
