use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use crate::article::Article;
use crate::dataset;

pub mod newsapi;

/// Regional headline edition requested from a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    World,
    Indian,
}

impl Edition {
    pub const ALL: [Edition; 2] = [Edition::World, Edition::Indian];

    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::World => "world",
            Edition::Indian => "indian",
        }
    }

    /// Built-in articles served when the provider is unavailable
    pub fn fallback(&self) -> &'static [Article] {
        match self {
            Edition::World => dataset::world_fallback(),
            Edition::Indian => dataset::indian_fallback(),
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of third-party headlines, normalized into [`Article`]s.
#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch the current top headlines for an edition
    async fn fetch_headlines(&self, edition: Edition) -> Result<Vec<Article>>;

    fn name(&self) -> &str;
}

/// Fetch headlines, substituting the edition's built-in set on any provider error.
pub async fn fetch_or_fallback<P: NewsProvider + ?Sized>(provider: &P, edition: Edition) -> Vec<Article> {
    match provider.fetch_headlines(edition).await {
        Ok(articles) => {
            info!(provider = provider.name(), %edition, count = articles.len(), "fetched headlines");
            articles
        }
        Err(e) => {
            warn!(provider = provider.name(), %edition, "headline fetch failed, using fallback articles: {:#}", e);
            edition.fallback().to_vec()
        }
    }
}
