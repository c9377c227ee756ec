//! Working set of articles shared by the HTTP handlers and the refresh worker.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::article::{Article, FactCheckStatus};
use crate::dataset;
use crate::filter::{filter, select_by_status, sort_by_recency, FilterSpec};
use crate::providers::Edition;

/// Named subset of the working set shown to a reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Trending,
    Latest,
    Verified,
    False,
    Indian,
    World,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Trending,
        View::Latest,
        View::Verified,
        View::False,
        View::Indian,
        View::World,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Trending => "trending",
            View::Latest => "latest",
            View::Verified => "verified",
            View::False => "false",
            View::Indian => "indian",
            View::World => "world",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        View::ALL
            .into_iter()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| anyhow::anyhow!("unknown view: {:?}", s))
    }
}

/// Point-in-time copy of the working set
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub trending: Vec<Article>,
    pub world: Vec<Article>,
    pub indian: Vec<Article>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn headlines(&self, edition: Edition) -> &[Article] {
        match edition {
            Edition::World => &self.world,
            Edition::Indian => &self.indian,
        }
    }

    /// Derive a view: pick its base collection, then apply `spec`.
    ///
    /// "latest" is ranked before filtering; "verified" and "false" are
    /// partitions of the fact-checked dataset rather than of the trending sample.
    pub fn view(&self, view: View, spec: &FilterSpec) -> Vec<Article> {
        match view {
            View::Trending => filter(&self.trending, spec),
            View::Latest => filter(&sort_by_recency(&self.trending), spec),
            View::Verified => filter(&select_by_status(dataset::all(), FactCheckStatus::True), spec),
            View::False => filter(&select_by_status(dataset::all(), FactCheckStatus::False), spec),
            View::Indian => filter(self.headlines(Edition::Indian), spec),
            View::World => filter(self.headlines(Edition::World), spec),
        }
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            trending: self.trending.len(),
            world: self.world.len(),
            indian: self.indian.len(),
            dataset: dataset::all().len(),
        }
    }

    /// Distinct publishers across the working set and the dataset, sorted
    pub fn known_sources(&self) -> Vec<String> {
        self.trending
            .iter()
            .chain(&self.world)
            .chain(&self.indian)
            .chain(dataset::all())
            .map(|a| a.source.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StoreCounts {
    pub trending: usize,
    pub world: usize,
    pub indian: usize,
    pub dataset: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleStore {
    inner: Arc<RwLock<Snapshot>>,
}

impl ArticleStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Random trending sample plus the built-in headline sets, ready to serve
    /// before the first provider refresh completes.
    pub fn seeded(trending_count: usize) -> Self {
        Self::new(Snapshot {
            trending: dataset::random_articles(trending_count),
            world: dataset::world_fallback().to_vec(),
            indian: dataset::indian_fallback().to_vec(),
            refreshed_at: None,
        })
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.inner.read().await.clone()
    }

    pub async fn view(&self, view: View, spec: &FilterSpec) -> Vec<Article> {
        self.inner.read().await.view(view, spec)
    }

    pub async fn known_sources(&self) -> Vec<String> {
        self.inner.read().await.known_sources()
    }

    pub async fn counts(&self) -> StoreCounts {
        self.inner.read().await.counts()
    }

    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.refreshed_at
    }

    pub async fn replace_headlines(&self, edition: Edition, articles: Vec<Article>) {
        let mut guard = self.inner.write().await;
        match edition {
            Edition::World => guard.world = articles,
            Edition::Indian => guard.indian = articles,
        }
    }

    pub async fn reshuffle_trending(&self, count: usize) {
        let sample = dataset::random_articles(count);
        self.inner.write().await.trending = sample;
    }

    pub async fn mark_refreshed(&self, at: DateTime<Utc>) {
        self.inner.write().await.refreshed_at = Some(at);
    }
}
