use std::str::FromStr;

use anyhow::Result;

use crate::error::FashioningError;

pub const DEFAULT_TRENDS_INDEX: &str = "fashion_trends";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Application configuration loaded from environment variables.
/// Every external service is optional: a missing key means that
/// collaborator runs degraded, never that startup fails.
#[derive(Debug, Clone)]
pub struct Config {
    // Search index
    pub algolia_app_id: Option<String>,
    pub algolia_api_key: Option<String>,
    pub algolia_trends_index: String,

    // Assistant
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,

    // Scraping
    pub scraper_user_agent: String,
    pub http_timeout_secs: u64,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

/// Connection settings for the remote index, present only when both
/// the application id and key are configured.
#[derive(Debug, Clone)]
pub struct AlgoliaSettings {
    pub app_id: String,
    pub api_key: String,
    pub trends_index: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            algolia_app_id: non_empty_env("ALGOLIA_APP_ID"),
            algolia_api_key: non_empty_env("ALGOLIA_ADMIN_API_KEY")
                .or_else(|| non_empty_env("ALGOLIA_API_KEY")),
            algolia_trends_index: std::env::var("ALGOLIA_TRENDS_INDEX")
                .unwrap_or_else(|_| DEFAULT_TRENDS_INDEX.to_string()),
            gemini_api_key: non_empty_env("GEMINI_API_KEY"),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            scraper_user_agent: std::env::var("SCRAPER_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            http_timeout_secs: numeric_env("HTTP_TIMEOUT_SECS", "10")?,
            web_host: std::env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: numeric_env("WEB_PORT", "8000")?,
        };

        config.log_keys();
        Ok(config)
    }

    /// Config with no external services, for tests and offline runs.
    pub fn offline() -> Self {
        Self {
            algolia_app_id: None,
            algolia_api_key: None,
            algolia_trends_index: DEFAULT_TRENDS_INDEX.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            scraper_user_agent: DEFAULT_USER_AGENT.to_string(),
            http_timeout_secs: 10,
            web_host: "127.0.0.1".to_string(),
            web_port: 8000,
        }
    }

    pub fn algolia(&self) -> Option<AlgoliaSettings> {
        match (&self.algolia_app_id, &self.algolia_api_key) {
            (Some(app_id), Some(api_key)) => Some(AlgoliaSettings {
                app_id: app_id.clone(),
                api_key: api_key.clone(),
                trends_index: self.algolia_trends_index.clone(),
            }),
            _ => None,
        }
    }

    fn log_keys(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  ALGOLIA_APP_ID: {}", preview_opt(&self.algolia_app_id));
        tracing::info!("  ALGOLIA_ADMIN_API_KEY: {}", preview_opt(&self.algolia_api_key));
        tracing::info!("  ALGOLIA_TRENDS_INDEX: {}", self.algolia_trends_index);
        tracing::info!("  GEMINI_API_KEY: {}", preview_opt(&self.gemini_api_key));
        tracing::info!("  GEMINI_MODEL: {}", self.gemini_model);
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn numeric_env<T: FromStr>(key: &str, default: &str) -> Result<T, FashioningError> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    parse_number(key, &raw)
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T, FashioningError> {
    raw.trim()
        .parse()
        .map_err(|_| FashioningError::Config(format!("{key} must be a number, got {raw:?}")))
}

fn preview(val: &str) -> String {
    let head: String = val.chars().take(5).collect();
    format!("{}...({} chars)", head, val.len())
}

fn preview_opt(val: &Option<String>) -> String {
    match val {
        Some(v) if !v.is_empty() => preview(v),
        _ => "<not set>".to_string(),
    }
}
