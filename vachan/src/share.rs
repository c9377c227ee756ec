use serde::Serialize;
use std::borrow::Cow;

use crate::article::Article;

/// Ready-to-open share targets for one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub url: String,
    pub text: String,
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub whatsapp: String,
    pub email: String,
}

/// Article link, else publisher link, else the site itself.
pub fn share_url<'a>(article: &'a Article, site_url: &'a str) -> &'a str {
    [article.url.as_deref(), article.source_url.as_deref()]
        .into_iter()
        .flatten()
        .find(|u| !u.is_empty())
        .unwrap_or(site_url)
}

/// Percent-encode a query component, leaving `!'()*` literal like browsers' `encodeURIComponent`.
fn encode(component: &str) -> Cow<'_, str> {
    let encoded = urlencoding::encode(component);
    if !encoded.contains("%2") {
        return encoded;
    }
    Cow::Owned(
        encoded
            .replace("%21", "!")
            .replace("%27", "'")
            .replace("%28", "(")
            .replace("%29", ")")
            .replace("%2A", "*"),
    )
}

pub fn share_text(article: &Article) -> String {
    format!(
        "{} - Fact check: {}. Source: {}",
        article.title,
        article.fact_check.status.as_str().to_uppercase(),
        article.source
    )
}

pub fn share_links(article: &Article, site_url: &str) -> ShareLinks {
    let url = share_url(article, site_url).to_string();
    let text = share_text(article);

    ShareLinks {
        twitter: format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            encode(&text),
            encode(&url)
        ),
        facebook: format!(
            "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
            encode(&url),
            encode(&text)
        ),
        linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={}", encode(&url)),
        whatsapp: format!("https://wa.me/?text={}", encode(&format!("{} {}", text, url))),
        email: format!(
            "mailto:?subject={}&body={}",
            encode(&article.title),
            encode(&format!("{}\n\n{}", text, url))
        ),
        url,
        text,
    }
}
