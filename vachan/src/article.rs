use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Details attached to headlines that came from the news provider and were never checked.
pub(crate) const NEWS_API_DETAILS: &str =
    "This article has been sourced from a news API and has not been fact-checked by our system yet.";

/// Verdict attached to an article by the fact-checking process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactCheckStatus {
    True,
    False,
    Misleading,
    Unverified,
}

impl FactCheckStatus {
    pub const ALL: [FactCheckStatus; 4] = [
        FactCheckStatus::True,
        FactCheckStatus::False,
        FactCheckStatus::Misleading,
        FactCheckStatus::Unverified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactCheckStatus::True => "true",
            FactCheckStatus::False => "false",
            FactCheckStatus::Misleading => "misleading",
            FactCheckStatus::Unverified => "unverified",
        }
    }

    /// Human readable verdict, e.g. "Verified True"
    pub fn label(&self) -> &'static str {
        match self {
            FactCheckStatus::True => "Verified True",
            FactCheckStatus::False => "False Information",
            FactCheckStatus::Misleading => "Misleading",
            FactCheckStatus::Unverified => "Unverified",
        }
    }

    /// One-sentence explanation shown next to the verdict
    pub fn description(&self) -> &'static str {
        match self {
            FactCheckStatus::True => "This information has been verified by multiple reliable sources.",
            FactCheckStatus::False => {
                "This information has been determined to be false based on fact-checking."
            }
            FactCheckStatus::Misleading => {
                "This information contains some truth but is presented in a misleading way."
            }
            FactCheckStatus::Unverified => "This information has not been verified yet.",
        }
    }
}

impl fmt::Display for FactCheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactCheckStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(FactCheckStatus::True),
            "false" => Ok(FactCheckStatus::False),
            "misleading" => Ok(FactCheckStatus::Misleading),
            "unverified" => Ok(FactCheckStatus::Unverified),
            other => anyhow::bail!("unknown fact-check status: {:?}", other),
        }
    }
}

/// Fact-check metadata for an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheck {
    pub status: FactCheckStatus,
    pub details: String,
    /// References consulted for the verdict, in citation order
    pub sources: Vec<String>,
}

impl FactCheck {
    pub fn new(status: FactCheckStatus, details: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            status,
            details: details.into(),
            sources,
        }
    }

    pub fn unverified(details: impl Into<String>, sources: Vec<String>) -> Self {
        Self::new(FactCheckStatus::Unverified, details, sources)
    }
}

/// A news item with its fact-check verdict.
///
/// Field names serialize in camelCase to match the JSON shape clients already consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub content: String,
    /// Publisher name, matched exactly by source filters
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub fact_check: FactCheck,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
        fact_check: FactCheck,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            source: source.into(),
            source_url: None,
            url: None,
            url_to_image: None,
            author: None,
            published_at: None,
            fact_check,
        }
    }

    pub fn published(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = Some(at);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn status(&self) -> FactCheckStatus {
        self.fact_check.status
    }
}
