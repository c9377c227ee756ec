/*!
common/src/lib.rs

Shared configuration types and helpers for Vachan.

This file provides:
- Config data structures (deserialized from TOML)
- An async loader for a TOML config file, with default + override layering
- Accessors resolving the documented defaults for optional settings
*/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/top-headlines";
pub const DEFAULT_NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";

/// News provider (NewsAPI-compatible top-headlines endpoint)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Endpoint, e.g. "https://newsapi.org/v2/top-headlines"
    pub api_url: Option<String>,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Language used for the world edition
    pub language: Option<String>,
    /// Country code used for the indian edition
    pub country: Option<String>,
    pub page_size: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

/// Trending feed settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Number of dataset articles sampled into the trending view
    pub trending_count: Option<usize>,
}

/// Background refresh settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub interval_seconds: Option<u64>,
}

/// HTTP server settings, merged into Rocket's figment at launch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
    /// Public URL used for share links when an article carries none
    pub site_url: Option<String>,
}

/// Defaults applied to filter requests that do not specify them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Offset from UTC used to compute the calendar day of an article
    pub utc_offset_minutes: Option<i32>,
}

/// Top-level application configuration (deserialized from config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
}

impl Config {
    /// Load configuration from a TOML file asynchronously.
    ///
    /// Example:
    ///   let cfg = Config::from_file("config.toml").await?;
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = tokio::fs::read_to_string(path.as_ref())
            .await
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let cfg: Config = toml::from_str(&data).context("Failed to parse TOML configuration")?;
        Ok(cfg)
    }

    /// Load configuration with an optional default file and an optional override file.
    /// If both are present, they are merged (override takes precedence).
    pub async fn load_with_defaults(default_path: Option<&Path>, override_path: Option<&Path>) -> Result<Self> {
        let mut config_value = toml::Value::Table(toml::map::Map::new());

        for (label, path) in [("default", default_path), ("override", override_path)] {
            let Some(path) = path else { continue };
            if !path.exists() {
                continue;
            }
            let data = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {} config: {}", label, path.display()))?;
            let val: toml::Value = toml::from_str(&data)
                .with_context(|| format!("Failed to parse {} configuration", label))?;
            merge_toml(&mut config_value, val);
        }

        let cfg: Config = config_value.try_into().context("Failed to parse merged configuration")?;
        Ok(cfg)
    }

    pub fn news_api_url(&self) -> &str {
        self.news.api_url.as_deref().unwrap_or(DEFAULT_NEWS_API_URL)
    }

    pub fn news_api_key_env(&self) -> &str {
        self.news.api_key_env.as_deref().unwrap_or(DEFAULT_NEWS_API_KEY_ENV)
    }

    pub fn news_language(&self) -> &str {
        self.news.language.as_deref().unwrap_or("en")
    }

    pub fn news_country(&self) -> &str {
        self.news.country.as_deref().unwrap_or("in")
    }

    pub fn news_page_size(&self) -> u32 {
        self.news.page_size.unwrap_or(10)
    }

    pub fn news_timeout_seconds(&self) -> u64 {
        self.news.timeout_seconds.unwrap_or(10)
    }

    pub fn trending_count(&self) -> usize {
        self.feed.trending_count.unwrap_or(10)
    }

    pub fn refresh_interval_seconds(&self) -> u64 {
        // Floor of one minute between provider refreshes.
        self.refresh.interval_seconds.unwrap_or(900).max(60)
    }

    pub fn site_url(&self) -> &str {
        self.server.site_url.as_deref().unwrap_or("http://localhost:8000/")
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.filters.utc_offset_minutes.unwrap_or(0)
    }
}

fn merge_toml(a: &mut toml::Value, b: toml::Value) {
    match (a, b) {
        (toml::Value::Table(a_map), toml::Value::Table(b_map)) => {
            for (k, v) in b_map {
                if let Some(a_val) = a_map.get_mut(&k) {
                    merge_toml(a_val, v);
                } else {
                    a_map.insert(k, v);
                }
            }
        }
        (a_val, b_val) => *a_val = b_val,
    }
}
