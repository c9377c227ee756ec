use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::{Edition, NewsProvider};
use crate::article::{Article, FactCheck, NEWS_API_DETAILS};

/// Client for a NewsAPI-compatible `top-headlines` endpoint
pub struct NewsApiProvider {
    api_url: String,
    api_key: String,
    language: String,
    country: String,
    page_size: u32,
    max_retries: u32,
    client: reqwest::Client,
}

impl NewsApiProvider {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_url, api_key, 10)
    }

    pub fn with_timeout(api_url: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("Vachan/0.1.0")
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            language: "en".to_string(),
            country: "in".to_string(),
            page_size: 10,
            max_retries: 3,
            client,
        })
    }

    /// Build from configuration, reading the API key from the configured environment variable.
    pub fn from_config(config: &common::Config) -> Result<Self> {
        let api_key_env = config.news_api_key_env();
        let api_key = std::env::var(api_key_env)
            .with_context(|| format!("news API key env var '{}' not set", api_key_env))?;

        Ok(Self::with_timeout(config.news_api_url(), api_key, config.news_timeout_seconds())?
            .with_editions(config.news_language(), config.news_country())
            .with_page_size(config.news_page_size()))
    }

    pub fn with_editions(mut self, language: impl Into<String>, country: impl Into<String>) -> Self {
        self.language = language.into();
        self.country = country.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    fn request_url(&self, edition: Edition) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .with_context(|| format!("invalid news API url: {}", self.api_url))?;
        {
            let mut query = url.query_pairs_mut();
            match edition {
                Edition::World => query.append_pair("language", &self.language),
                Edition::Indian => query.append_pair("country", &self.country),
            };
            query
                .append_pair("pageSize", &self.page_size.to_string())
                .append_pair("apiKey", &self.api_key);
        }
        Ok(url)
    }

    async fn fetch_once(&self, url: &Url) -> std::result::Result<TopHeadlinesResponse, Attempt> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                return Err(Attempt::Retry(anyhow::Error::new(e).context("network error during headline fetch")))
            }
        };

        let status = response.status();
        if status.is_success() {
            return response
                .json::<TopHeadlinesResponse>()
                .await
                .context("failed to parse headlines response")
                .map_err(Attempt::Fatal);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<TopHeadlinesResponse>(&body)
            .ok()
            .and_then(|r| r.message)
            .unwrap_or(body);
        let err = anyhow::anyhow!("news API error {}: {}", status, message);

        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Err(Attempt::Retry(err))
        } else {
            // Client error (4xx) - bad key or parameters, retrying will not help
            Err(Attempt::Fatal(err))
        }
    }
}

enum Attempt {
    Retry(anyhow::Error),
    Fatal(anyhow::Error),
}

#[async_trait::async_trait]
impl NewsProvider for NewsApiProvider {
    async fn fetch_headlines(&self, edition: Edition) -> Result<Vec<Article>> {
        let url = self.request_url(edition)?;
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            if attempt > 1 {
                let backoff = Duration::from_secs(2u64.pow(attempt - 2)); // 1s, 2s, 4s...
                info!(%edition, attempt, max = self.max_retries, ?backoff, "retrying headline fetch");
                tokio::time::sleep(backoff).await;
            }

            match self.fetch_once(&url).await {
                Ok(body) => return body.into_articles(),
                Err(Attempt::Retry(e)) => last_error = Some(e),
                Err(Attempt::Fatal(e)) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("unknown error after retries")))
    }

    fn name(&self) -> &str {
        "newsapi"
    }
}

#[derive(Debug, Deserialize)]
struct TopHeadlinesResponse {
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Option<Vec<RawArticle>>,
}

impl TopHeadlinesResponse {
    fn into_articles(self) -> Result<Vec<Article>> {
        if self.status != "ok" {
            anyhow::bail!(
                "news API returned status {:?} ({}): {}",
                self.status,
                self.code.as_deref().unwrap_or("no code"),
                self.message.as_deref().unwrap_or("no message")
            );
        }
        let raw = self.articles.context("news API response has no articles")?;
        debug!(count = raw.len(), "normalizing provider articles");
        Ok(raw.into_iter().map(normalize_article).collect())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

/// Article as returned by the provider, before normalization
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Map a provider article onto [`Article`], filling the defaults used for
/// headlines that have not been fact-checked.
pub fn normalize_article(raw: RawArticle) -> Article {
    let source = non_empty(raw.source.and_then(|s| s.name)).unwrap_or_else(|| "Unknown Source".to_string());
    let url = non_empty(raw.url);

    Article {
        title: non_empty(raw.title).unwrap_or_else(|| "Untitled".to_string()),
        content: non_empty(raw.description)
            .or_else(|| non_empty(raw.content))
            .unwrap_or_else(|| "No content available".to_string()),
        source_url: url.clone(),
        url,
        url_to_image: non_empty(raw.url_to_image),
        author: non_empty(raw.author),
        published_at: raw.published_at.as_deref().and_then(parse_timestamp),
        fact_check: FactCheck::unverified(NEWS_API_DETAILS, vec![source.clone()]),
        source,
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
