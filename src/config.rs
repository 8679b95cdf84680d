//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

/// Default countdown length started by the client: 37.5 hours
pub const DEFAULT_DURATION_MINUTES: u64 = 2250;

/// Name of the local cache entry holding the end time
pub const CACHE_KEY: &str = "countdownEndTime";

/// Server CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "shared-countdown")]
#[command(about = "Serve a shared countdown whose end time is kept in a GitHub gist")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Gist holding the countdown record
    #[arg(long, env = "GIST_ID")]
    pub gist_id: Option<String>,

    /// Token allowed to read and update the gist
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api: String,

    /// File inside the gist that stores the record
    #[arg(long, default_value = "state.json")]
    pub state_file: String,

    /// Keep the countdown in process memory instead of a gist
    #[arg(long)]
    pub in_memory: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Gist id and token, if both are present and non-empty
    pub fn gist_credentials(&self) -> Option<(&str, &str)> {
        let gist_id = self.gist_id.as_deref().filter(|s| !s.trim().is_empty())?;
        let token = self.github_token.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((gist_id, token))
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            gist_id: None,
            github_token: None,
            github_api: "https://api.github.com".to_string(),
            state_file: "state.json".to_string(),
            in_memory: false,
            verbose: false,
        }
    }
}

/// Client CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "countdown-client")]
#[command(about = "Show the shared countdown live in the terminal")]
#[command(version)]
pub struct ClientConfig {
    /// Countdown endpoint of the server
    #[arg(long, env = "COUNTDOWN_SERVER", default_value = "http://127.0.0.1:3000/api/countdown")]
    pub server: String,

    /// File caching the end time between runs
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Countdown length in minutes when starting
    #[arg(short, long, default_value_t = DEFAULT_DURATION_MINUTES)]
    pub duration_minutes: u64,

    /// Start (or restart) the countdown
    #[arg(short, long)]
    pub start: bool,

    /// Never contact the server
    #[arg(long)]
    pub offline: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ClientConfig {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Countdown length in milliseconds
    pub fn duration_millis(&self) -> i64 {
        i64::try_from(self.duration_minutes.saturating_mul(60_000)).unwrap_or(i64::MAX)
    }

    /// Where the end time is cached: `--cache`, else the user cache directory
    pub fn cache_path(&self) -> PathBuf {
        self.cache.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("shared-countdown")
                .join(CACHE_KEY)
        })
    }
}
