//! Built-in fact-checked articles.
//!
//! The verified/false views and the trending sample are drawn from this set;
//! the world and indian editions fall back to their own unverified sets when
//! the news provider cannot be reached.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::article::{Article, FactCheck, FactCheckStatus, NEWS_API_DETAILS};
use crate::filter::select_by_status;

static DATASET: Lazy<Vec<Article>> = Lazy::new(build_dataset);
static WORLD_FALLBACK: Lazy<Vec<Article>> = Lazy::new(build_world_fallback);
static INDIAN_FALLBACK: Lazy<Vec<Article>> = Lazy::new(build_indian_fallback);

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single()
}

#[allow(clippy::too_many_arguments)]
fn checked(
    title: &str,
    content: &str,
    source: &str,
    url: &str,
    published_at: Option<DateTime<Utc>>,
    status: FactCheckStatus,
    details: &str,
    sources: &[&str],
) -> Article {
    let mut article = Article::new(
        title,
        content,
        source,
        FactCheck::new(status, details, sources.iter().map(|s| s.to_string()).collect()),
    )
    .with_url(url);
    article.source_url = Some(url.to_string());
    article.published_at = published_at;
    article
}

fn unverified(title: &str, content: &str, source: &str, url: &str, published_at: Option<DateTime<Utc>>) -> Article {
    let mut article = Article::new(
        title,
        content,
        source,
        FactCheck::unverified(NEWS_API_DETAILS, vec![source.to_string()]),
    )
    .with_url(url);
    article.source_url = Some(url.to_string());
    article.published_at = published_at;
    article
}

fn build_dataset() -> Vec<Article> {
    use FactCheckStatus::*;

    vec![
        checked(
            "ISRO successfully places navigation satellite in orbit",
            "The Indian Space Research Organisation launched its latest navigation satellite, extending regional positioning coverage.",
            "The Hindu",
            "https://www.thehindu.com/sci-tech/science/isro-navigation-satellite/",
            at(2025, 3, 14, 6, 30),
            True,
            "Launch telemetry and the orbit insertion were confirmed by ISRO and independent trackers.",
            &["ISRO official statement", "NASA tracking report"],
        ),
        checked(
            "Government to ban all cash transactions above Rs 2,000 from next month",
            "Messages circulating on social media claim that cash payments above Rs 2,000 will be illegal from next month.",
            "WhatsApp forward",
            "https://factcheck.example.in/cash-ban-claim",
            at(2025, 3, 13, 18, 5),
            False,
            "No such notification exists. The Reserve Bank and the Finance Ministry have not announced any cap on cash payments.",
            &["PIB Fact Check clarification", "Reserve Bank of India press release", "Ministry of Finance statement"],
        ),
        checked(
            "WHO confirms new dengue vaccine guidance for South Asia",
            "The World Health Organization published updated recommendations on dengue vaccination for endemic regions.",
            "Reuters",
            "https://www.reuters.com/business/healthcare-pharmaceuticals/who-dengue-guidance/",
            at(2025, 3, 12, 11, 0),
            True,
            "The guidance is published on the WHO website and matches the reported recommendations.",
            &["WHO report", "ICMR analysis"],
        ),
        checked(
            "Drinking hot water every hour cures viral infections, doctors say",
            "A viral video claims that drinking hot water every hour eliminates viral infections within two days.",
            "Social media video",
            "https://factcheck.example.in/hot-water-cure",
            at(2025, 3, 12, 7, 45),
            False,
            "Medical experts at AIIMS state that hydration helps recovery but does not cure viral infections.",
            &["AIIMS statement", "WHO report"],
        ),
        checked(
            "Supreme Court orders nationwide review of road safety norms",
            "The Supreme Court directed states to submit compliance reports on road safety measures.",
            "NDTV",
            "https://www.ndtv.com/india-news/supreme-court-road-safety-review/",
            at(2025, 3, 11, 9, 15),
            True,
            "The order is available on the court's website; the reported directions match the text.",
            &["Supreme Court of India order", "Ministry of Road Transport and Highways statement"],
        ),
        checked(
            "Stock market regulator bans all retail options trading",
            "Posts claim that retail investors will no longer be allowed to trade options on Indian exchanges.",
            "Times of India",
            "https://timesofindia.indiatimes.com/business/sebi-options-rules/",
            at(2025, 3, 10, 14, 20),
            Misleading,
            "SEBI tightened eligibility and margin rules for derivatives; it did not ban retail options trading.",
            &["SEBI press release", "NSE circular"],
        ),
        checked(
            "Election Commission announces remote voting for migrant workers",
            "Reports say migrant workers will be able to vote remotely in the next general election.",
            "India Today",
            "https://www.indiatoday.in/elections/remote-voting-migrant-workers/",
            at(2025, 3, 9, 16, 0),
            Misleading,
            "The Election Commission proposed a pilot of remote voting machines; no rollout has been announced.",
            &["Election Commission of India press release"],
        ),
        checked(
            "Photo shows flooded airport runway in Chennai",
            "An image of a flooded runway is being shared as a recent picture of Chennai airport.",
            "Twitter post",
            "https://factcheck.example.in/chennai-runway-photo",
            at(2025, 3, 8, 10, 30),
            False,
            "Reverse image search shows the photo dates from 2015 floods; forensic analysis found no recent match.",
            &["Digital Forensics lab analysis", "Airports Authority of India statement"],
        ),
        checked(
            "RBI keeps repo rate unchanged at policy review",
            "The Reserve Bank of India held its benchmark rate steady and retained its inflation projection.",
            "BBC",
            "https://www.bbc.com/news/business-rbi-policy-review/",
            at(2025, 3, 7, 5, 0),
            True,
            "The monetary policy statement published by the RBI confirms the decision.",
            &["Reserve Bank of India press release", "World Bank report"],
        ),
        checked(
            "Cyber police warn of fake parcel delivery calls",
            "Citizens are being targeted by callers posing as courier agents demanding customs fees.",
            "The Hindu",
            "https://www.thehindu.com/news/national/fake-parcel-scam/",
            at(2025, 3, 6, 13, 10),
            True,
            "The advisory is listed on the national cyber crime reporting portal.",
            &["National Cyber Crime Reporting Portal advisory"],
        ),
        checked(
            "New law requires lawyers to pass annual exam",
            "A message claims advocates must now clear a yearly examination to keep practising.",
            "Facebook post",
            "https://factcheck.example.in/lawyer-annual-exam",
            None,
            False,
            "The Bar Council of India has no such rule; the claim misrepresents a proposal on continuing education.",
            &["Bar Council of India clarification"],
        ),
        checked(
            "Study links screen time to sleep loss in teenagers",
            "A survey of school students reports shorter sleep among heavy smartphone users.",
            "NDTV",
            "https://www.ndtv.com/health/screen-time-sleep-study/",
            None,
            Unverified,
            "The underlying survey has not been published yet, so the figures could not be checked.",
            &["ICMR validation study"],
        ),
        checked(
            "Monsoon expected to arrive a week early, forecast says",
            "A private forecaster predicts an early onset of the southwest monsoon over Kerala.",
            "Times of India",
            "https://timesofindia.indiatimes.com/city/monsoon-early-onset/",
            at(2025, 3, 5, 8, 0),
            Unverified,
            "The India Meteorological Department has not yet issued its onset forecast.",
            &["India Meteorological Department report"],
        ),
        checked(
            "Viral clip shows tiger roaming city streets in Pune",
            "A video shared widely claims to show a tiger walking through a residential area of Pune.",
            "Instagram reel",
            "https://factcheck.example.in/pune-tiger-clip",
            at(2025, 3, 4, 21, 40),
            Misleading,
            "The clip is genuine but was filmed near a reserve forest in Maharashtra, not in Pune city.",
            &["Maharashtra Forest Department statement", "Digital Forensics lab analysis"],
        ),
    ]
}

fn build_world_fallback() -> Vec<Article> {
    vec![
        unverified(
            "Global leaders meet to discuss climate finance",
            "Representatives from over 100 countries met to negotiate funding for climate adaptation.",
            "Reuters",
            "https://www.reuters.com/world/climate-finance-talks/",
            at(2025, 3, 14, 12, 0),
        ),
        unverified(
            "Central banks signal cautious approach to rate cuts",
            "Major central banks indicated they would wait for clearer inflation data before easing policy.",
            "BBC",
            "https://www.bbc.com/news/business-central-banks-rates/",
            at(2025, 3, 14, 9, 30),
        ),
        unverified(
            "Researchers report progress on malaria vaccine rollout",
            "Health agencies say vaccination campaigns have reached millions of children in Africa.",
            "Associated Press",
            "https://apnews.com/article/malaria-vaccine-rollout/",
            at(2025, 3, 13, 15, 45),
        ),
    ]
}

fn build_indian_fallback() -> Vec<Article> {
    vec![
        unverified(
            "Parliament session to take up data protection rules",
            "The upcoming session is expected to debate rules notified under the data protection act.",
            "The Hindu",
            "https://www.thehindu.com/news/national/data-protection-rules-session/",
            at(2025, 3, 14, 4, 30),
        ),
        unverified(
            "Metro expansion approved for three more cities",
            "The Union Cabinet approved new metro rail corridors in three tier-two cities.",
            "NDTV",
            "https://www.ndtv.com/india-news/metro-expansion-approved/",
            at(2025, 3, 13, 11, 20),
        ),
        unverified(
            "India wins T20 series against Australia",
            "A late batting surge sealed the series win in the deciding match.",
            "India Today",
            "https://www.indiatoday.in/sports/cricket/india-win-t20-series/",
            None,
        ),
    ]
}

/// The full fact-checked dataset, in curation order.
pub fn all() -> &'static [Article] {
    &DATASET
}

pub fn world_fallback() -> &'static [Article] {
    &WORLD_FALLBACK
}

pub fn indian_fallback() -> &'static [Article] {
    &INDIAN_FALLBACK
}

/// Dataset articles carrying the given verdict, in curation order.
pub fn articles_by_status(status: FactCheckStatus) -> Vec<Article> {
    select_by_status(all(), status)
}

/// A uniformly random sample of `min(count, len)` distinct dataset articles.
pub fn random_articles(count: usize) -> Vec<Article> {
    random_articles_with(&mut rand::thread_rng(), count)
}

pub fn random_articles_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Article> {
    let mut sample = all().to_vec();
    sample.shuffle(rng);
    sample.truncate(count);
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn dataset_covers_every_status() {
        for status in FactCheckStatus::ALL {
            assert!(
                !articles_by_status(status).is_empty(),
                "no dataset article with status {}",
                status
            );
        }
    }

    #[test]
    fn dataset_contains_undated_articles() {
        assert!(all().iter().any(|a| a.published_at.is_none()));
        assert!(all().iter().any(|a| a.published_at.is_some()));
    }

    #[test]
    fn fallback_articles_are_unverified() {
        for a in world_fallback().iter().chain(indian_fallback()) {
            assert_eq!(a.status(), FactCheckStatus::Unverified);
            assert_eq!(a.fact_check.details, NEWS_API_DETAILS);
            assert_eq!(a.fact_check.sources, vec![a.source.clone()]);
        }
    }

    #[test]
    fn random_sample_is_distinct_and_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let sample = random_articles_with(&mut rng, 5);
        assert_eq!(sample.len(), 5);
        let titles: HashSet<_> = sample.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles.len(), 5);
        assert!(sample.iter().all(|a| all().contains(a)));

        let everything = random_articles(all().len() + 10);
        assert_eq!(everything.len(), all().len());
    }

    #[test]
    fn articles_by_status_keeps_curation_order() {
        let false_titles: Vec<_> = articles_by_status(FactCheckStatus::False)
            .into_iter()
            .map(|a| a.title)
            .collect();
        let expected: Vec<_> = all()
            .iter()
            .filter(|a| a.status() == FactCheckStatus::False)
            .map(|a| a.title.clone())
            .collect();
        assert_eq!(false_titles, expected);
    }
}
