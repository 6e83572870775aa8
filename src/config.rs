use crate::auction::Amount;
use clap::Parser;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Sale the bid listing is filtered to, unless configured otherwise
pub const DEFAULT_SALE_FILTER: &str = "UNtL5dPLLNLcccqSwUjR2x";

/// Process-wide settings, loaded once at startup
#[derive(Parser, Clone)]
#[command(name = "outbid")]
#[command(about = "Re-bid on an auction when someone else holds the leading bid")]
pub struct Config {
    /// Base URL of the auction API
    #[arg(long, env = "API_BASE_URL")]
    pub api_base_url: String,

    /// Bearer token for the auction API
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    pub token: String,

    /// Only bid while the auction's minimum bid is below this amount
    #[arg(long, env = "MIN_BID", default_value_t = 100)]
    pub min_bid_threshold: Amount,

    /// Sale used to filter the listing of our bids
    #[arg(long, env = "SALE_FILTER", default_value = DEFAULT_SALE_FILTER)]
    pub sale_filter: String,

    /// Timeout applied to every API request
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Append logs to this file instead of writing them to stderr
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Export the variables of a `.env` file into the process environment
///
/// Without a path, `.env` is searched for from the current directory up.
/// Variables already set in the environment win. Returns the file that
/// was read, if any.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).ok().map(|()| path.to_owned()),
        None => dotenvy::dotenv().ok(),
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("token", &"<redacted>")
            .field("min_bid_threshold", &self.min_bid_threshold)
            .field("sale_filter", &self.sale_filter)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_file", &self.log_file)
            .finish()
    }
}
