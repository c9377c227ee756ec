use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{get, routes, Build, Rocket, State};
use serde::Serialize;
use tracing::{debug, info};

use common::Config;

use crate::article::{Article, FactCheckStatus};
use crate::filter::FilterSpec;
use crate::share::{share_links, ShareLinks};
use crate::sources::{source_links, SourceLink};
use crate::store::{ArticleStore, StoreCounts, View};

/// Application state stored inside Rocket managed state.
#[derive(Clone)]
pub struct AppState {
    pub started_at: DateTime<Utc>,
    pub config: Arc<Config>,
    pub store: ArticleStore,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: ArticleStore) -> Self {
        Self {
            started_at: Utc::now(),
            config,
            store,
        }
    }
}

/// Response structure for `/api/v1/status`.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    uptime_seconds: i64,
    articles: StoreCounts,
    last_refresh: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = Custom<Json<ErrorBody>>;

fn bad_request(e: anyhow::Error) -> ApiError {
    Custom(Status::BadRequest, Json(ErrorBody { error: format!("{:#}", e) }))
}

#[derive(Debug, Serialize)]
pub struct Verdict {
    pub status: FactCheckStatus,
    pub label: &'static str,
    pub description: &'static str,
}

/// An article together with everything a client needs to render it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCard {
    #[serde(flatten)]
    pub article: Article,
    pub verdict: Verdict,
    pub source_links: Vec<SourceLink>,
    pub share: ShareLinks,
}

impl ArticleCard {
    pub fn new(article: Article, site_url: &str) -> Self {
        let status = article.fact_check.status;
        Self {
            verdict: Verdict {
                status,
                label: status.label(),
                description: status.description(),
            },
            source_links: source_links(&article.fact_check),
            share: share_links(&article, site_url),
            article,
        }
    }
}

/// Build a [`FilterSpec`] from raw query values.
///
/// Empty `date` means no date restriction. The offset falls back to
/// `default_offset_minutes` when the request does not carry one.
pub fn parse_filter_spec(
    sources: &[String],
    statuses: &[String],
    date: Option<&str>,
    tz_offset_minutes: Option<&str>,
    default_offset_minutes: i32,
) -> Result<FilterSpec> {
    let statuses = statuses
        .iter()
        .map(|s| s.parse::<FactCheckStatus>())
        .collect::<Result<Vec<_>>>()?;

    let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => Some(
            NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .with_context(|| format!("invalid date {:?}, expected YYYY-MM-DD", d))?,
        ),
        None => None,
    };

    let offset_minutes = match tz_offset_minutes.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t
            .parse::<i32>()
            .with_context(|| format!("invalid tz_offset_minutes {:?}", t))?,
        None => default_offset_minutes,
    };
    let timezone = offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| anyhow!("tz_offset_minutes out of range: {}", offset_minutes))?;

    Ok(FilterSpec::builder()
        .sources(sources.iter().cloned())
        .statuses(statuses)
        .date(date)
        .timezone(timezone)
        .build())
}

#[get("/health")]
async fn health() -> &'static str {
    "OK"
}

/// Status endpoint returning uptime and working-set sizes.
#[get("/api/v1/status")]
async fn service_status(state: &State<AppState>) -> Json<StatusResponse> {
    let uptime = (Utc::now() - state.started_at).num_seconds();
    let snapshot = state.store.snapshot().await;

    Json(StatusResponse {
        status: "ok",
        uptime_seconds: uptime,
        articles: snapshot.counts(),
        last_refresh: snapshot.refreshed_at,
    })
}

#[get("/api/v1/sources")]
async fn list_sources(state: &State<AppState>) -> Json<Vec<String>> {
    Json(state.store.known_sources().await)
}

#[get("/api/v1/views")]
async fn list_views() -> Json<Vec<&'static str>> {
    Json(View::ALL.iter().map(|v| v.as_str()).collect())
}

#[get("/api/v1/views/<view>?<source>&<status>&<date>&<tz_offset_minutes>")]
async fn get_view(
    state: &State<AppState>,
    view: &str,
    source: Option<Vec<String>>,
    status: Option<Vec<String>>,
    date: Option<String>,
    tz_offset_minutes: Option<String>,
) -> Result<Json<Vec<ArticleCard>>, ApiError> {
    let view: View = view.parse().map_err(bad_request)?;
    let spec = parse_filter_spec(
        &source.unwrap_or_default(),
        &status.unwrap_or_default(),
        date.as_deref(),
        tz_offset_minutes.as_deref(),
        state.config.utc_offset_minutes(),
    )
    .map_err(bad_request)?;

    let articles = state.store.view(view, &spec).await;
    debug!(%view, ?spec, count = articles.len(), "serving view");

    let site_url = state.config.site_url();
    Ok(Json(
        articles
            .into_iter()
            .map(|a| ArticleCard::new(a, site_url))
            .collect(),
    ))
}

/// Assemble the Rocket instance with managed state and all routes mounted.
pub fn build_rocket(state: AppState, figment: rocket::figment::Figment) -> Rocket<Build> {
    rocket::custom(figment).manage(state).mount(
        "/",
        routes![health, service_status, list_sources, list_views, get_view],
    )
}

pub async fn launch_rocket(config: Arc<Config>, store: ArticleStore) -> Result<()> {
    // Apply server.bind and server.port from the application config on top of Rocket's own sources.
    let mut fig = rocket::Config::figment();
    if let Some(bind) = &config.server.bind {
        fig = fig.merge(("address", bind.clone()));
    }
    if let Some(port) = config.server.port {
        fig = fig.merge(("port", port));
    }

    let rocket = build_rocket(AppState::new(config, store), fig);

    // Launch Rocket - this will run until shutdown (SIGINT/SIGTERM etc.)
    info!("Starting Rocket HTTP server");
    rocket
        .launch()
        .await
        .map_err(|e| anyhow!("Rocket failed: {}", e))?;

    info!("Rocket HTTP server has shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_unrestricted() {
        let spec = parse_filter_spec(&[], &[], None, None, 0).unwrap();
        assert!(spec.is_unrestricted());
        assert_eq!(spec.timezone(), FixedOffset::east_opt(0).unwrap());

        let spec = parse_filter_spec(&[], &[], Some(""), Some(" "), 0).unwrap();
        assert!(spec.is_unrestricted());
    }

    #[test]
    fn query_values_populate_the_spec() {
        let spec = parse_filter_spec(
            &["BBC".into(), "NDTV".into()],
            &["false".into(), "Misleading".into()],
            Some("2025-03-12"),
            Some("330"),
            0,
        )
        .unwrap();

        assert_eq!(spec.sources().len(), 2);
        assert!(spec.statuses().contains(&FactCheckStatus::False));
        assert!(spec.statuses().contains(&FactCheckStatus::Misleading));
        assert_eq!(spec.date(), NaiveDate::from_ymd_opt(2025, 3, 12));
        assert_eq!(spec.timezone(), FixedOffset::east_opt(330 * 60).unwrap());
    }

    #[test]
    fn default_offset_applies_when_request_has_none() {
        let spec = parse_filter_spec(&[], &[], None, None, -300).unwrap();
        assert_eq!(spec.timezone(), FixedOffset::west_opt(300 * 60).unwrap());
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(parse_filter_spec(&[], &["maybe".into()], None, None, 0).is_err());
        assert!(parse_filter_spec(&[], &[], Some("12/03/2025"), None, 0).is_err());
        assert!(parse_filter_spec(&[], &[], None, Some("east"), 0).is_err());
        assert!(parse_filter_spec(&[], &[], None, Some("100000"), 0).is_err());
    }

    #[test]
    fn card_carries_verdict_and_links() {
        let article = crate::dataset::articles_by_status(FactCheckStatus::False)
            .into_iter()
            .next()
            .unwrap();
        let card = ArticleCard::new(article.clone(), "https://vachan.example/");
        assert_eq!(card.verdict.label, "False Information");
        assert_eq!(card.source_links.len(), article.fact_check.sources.len());

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["title"], article.title);
        assert_eq!(json["verdict"]["status"], "false");
        assert!(json["sourceLinks"].is_array());
        assert!(json["share"]["twitter"].as_str().unwrap().starts_with("https://twitter.com/"));
    }
}
