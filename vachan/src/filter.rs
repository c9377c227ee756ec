//! Article filtering and ranking.
//!
//! Everything here is a pure function over a borrowed slice: inputs are never
//! mutated and results are fresh vectors, so views can be derived concurrently
//! from the same snapshot.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::article::{Article, FactCheckStatus};

/// Constraints used to derive a view from an article collection.
///
/// Empty sets and an absent date impose no restriction. Built once per
/// filter invocation through [`FilterSpecBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    sources: BTreeSet<String>,
    statuses: BTreeSet<FactCheckStatus>,
    date: Option<NaiveDate>,
    timezone: FixedOffset,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            sources: BTreeSet::new(),
            statuses: BTreeSet::new(),
            date: None,
            timezone: Utc.fix(),
        }
    }
}

impl FilterSpec {
    pub fn builder() -> FilterSpecBuilder {
        FilterSpecBuilder::default()
    }

    pub fn sources(&self) -> &BTreeSet<String> {
        &self.sources
    }

    pub fn statuses(&self) -> &BTreeSet<FactCheckStatus> {
        &self.statuses
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Offset in which an article's calendar day is computed
    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn is_unrestricted(&self) -> bool {
        self.sources.is_empty() && self.statuses.is_empty() && self.date.is_none()
    }

    pub fn matches_source(&self, article: &Article) -> bool {
        self.sources.is_empty() || self.sources.contains(&article.source)
    }

    pub fn matches_status(&self, article: &Article) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&article.fact_check.status)
    }

    /// An article without a timestamp never matches a date restriction.
    pub fn matches_date(&self, article: &Article) -> bool {
        match self.date {
            None => true,
            Some(day) => article
                .published_at
                .map(|at| at.with_timezone(&self.timezone).date_naive() == day)
                .unwrap_or(false),
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        self.matches_source(article) && self.matches_status(article) && self.matches_date(article)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterSpecBuilder {
    spec: FilterSpec,
}

impl FilterSpecBuilder {
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.spec.sources.insert(source.into());
        self
    }

    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    pub fn status(mut self, status: FactCheckStatus) -> Self {
        self.spec.statuses.insert(status);
        self
    }

    pub fn statuses<I>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = FactCheckStatus>,
    {
        self.spec.statuses.extend(statuses);
        self
    }

    pub fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.spec.date = date;
        self
    }

    pub fn timezone(mut self, offset: FixedOffset) -> Self {
        self.spec.timezone = offset;
        self
    }

    pub fn build(self) -> FilterSpec {
        self.spec
    }
}

/// Keep the articles satisfying every predicate of `spec`, in input order.
pub fn filter(articles: &[Article], spec: &FilterSpec) -> Vec<Article> {
    articles.iter().filter(|a| spec.matches(a)).cloned().collect()
}

/// Newest first. A missing timestamp counts as the Unix epoch; equal keys keep input order.
pub fn sort_by_recency(articles: &[Article]) -> Vec<Article> {
    let mut sorted = articles.to_vec();
    // sort_by_key is stable
    sorted.sort_by_key(|a| Reverse(recency_key(a)));
    sorted
}

fn recency_key(article: &Article) -> DateTime<Utc> {
    article.published_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Articles carrying exactly the given verdict, in input order.
pub fn select_by_status(articles: &[Article], status: FactCheckStatus) -> Vec<Article> {
    filter(articles, &FilterSpec::builder().status(status).build())
}
