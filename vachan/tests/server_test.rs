use rocket::http::Status;
use rocket::local::asynchronous::Client;
use std::sync::Arc;
use vachan::server::{build_rocket, AppState};
use vachan::store::{ArticleStore, Snapshot};
use vachan::{Article, FactCheck, FactCheckStatus};

fn article(title: &str, source: &str, status: FactCheckStatus, published: Option<&str>) -> Article {
    let mut a = Article::new(
        title,
        "",
        source,
        FactCheck::new(status, "checked", vec!["PIB Fact Check clarification".into()]),
    );
    a.published_at = published.map(|p| p.parse().expect("timestamp"));
    a
}

async fn client() -> Client {
    let store = ArticleStore::new(Snapshot {
        trending: vec![
            article("a", "BBC", FactCheckStatus::True, Some("2024-01-01T23:59:00Z")),
            article("b", "CNN", FactCheckStatus::False, Some("2024-01-02T00:00:01Z")),
            article("c", "BBC", FactCheckStatus::Misleading, None),
        ],
        ..Snapshot::default()
    });
    let config: common::Config = toml::from_str("[server]\nsite_url = \"https://vachan.example/\"")
        .expect("parse config");
    let state = AppState::new(Arc::new(config), store);

    Client::tracked(build_rocket(state, rocket::Config::figment()))
        .await
        .expect("valid rocket instance")
}

async fn get_json(client: &Client, uri: &str) -> (Status, serde_json::Value) {
    let response = client.get(uri.to_string()).dispatch().await;
    let status = response.status();
    let body = response.into_string().await.unwrap_or_default();
    (status, serde_json::from_str(&body).unwrap_or(serde_json::Value::Null))
}

fn titles(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|c| c["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_and_status() {
    let client = client().await;

    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().await.as_deref(), Some("OK"));

    let (status, body) = get_json(&client, "/api/v1/status").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["articles"]["trending"], 3);
    assert!(body["last_refresh"].is_null());
}

#[tokio::test]
async fn test_view_with_filters() {
    let client = client().await;

    let (status, body) = get_json(&client, "/api/v1/views/trending").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(titles(&body), vec!["a", "b", "c"]);

    let (_, body) = get_json(&client, "/api/v1/views/trending?source=BBC").await;
    assert_eq!(titles(&body), vec!["a", "c"]);

    let (_, body) = get_json(&client, "/api/v1/views/latest?source=BBC&source=CNN").await;
    assert_eq!(titles(&body), vec!["b", "a", "c"]);

    let (_, body) = get_json(&client, "/api/v1/views/trending?status=false&status=misleading").await;
    assert_eq!(titles(&body), vec!["b", "c"]);

    let (_, body) = get_json(&client, "/api/v1/views/trending?date=2024-01-01").await;
    assert_eq!(titles(&body), vec!["a"]);

    // in UTC+05:30 both dated articles fall on Jan 2nd
    let (_, body) = get_json(&client, "/api/v1/views/trending?date=2024-01-02&tz_offset_minutes=330").await;
    assert_eq!(titles(&body), vec!["a", "b"]);
}

#[tokio::test]
async fn test_view_cards_carry_verdict_and_links() {
    let client = client().await;

    let (_, body) = get_json(&client, "/api/v1/views/trending?status=false").await;
    let card = &body[0];
    assert_eq!(card["factCheck"]["status"], "false");
    assert_eq!(card["verdict"]["label"], "False Information");
    assert_eq!(card["sourceLinks"][0]["url"], "https://pib.gov.in/");
    assert_eq!(card["share"]["url"], "https://vachan.example/");
}

#[tokio::test]
async fn test_dataset_views() {
    let client = client().await;

    let (status, body) = get_json(&client, "/api/v1/views/verified").await;
    assert_eq!(status, Status::Ok);
    let cards = body.as_array().expect("array body");
    assert!(!cards.is_empty());
    assert!(cards.iter().all(|c| c["factCheck"]["status"] == "true"));
}

#[tokio::test]
async fn test_bad_requests() {
    let client = client().await;

    let (status, body) = get_json(&client, "/api/v1/views/popular").await;
    assert_eq!(status, Status::BadRequest);
    assert!(body["error"].as_str().unwrap_or_default().contains("unknown view"));

    let (status, _) = get_json(&client, "/api/v1/views/trending?status=maybe").await;
    assert_eq!(status, Status::BadRequest);

    let (status, _) = get_json(&client, "/api/v1/views/trending?date=01-02-2024").await;
    assert_eq!(status, Status::BadRequest);
}

#[tokio::test]
async fn test_sources_and_view_names() {
    let client = client().await;

    let (_, body) = get_json(&client, "/api/v1/sources").await;
    let sources: Vec<&str> = body.as_array().expect("array").iter().filter_map(|s| s.as_str()).collect();
    assert!(sources.contains(&"BBC"));
    assert!(sources.contains(&"CNN"));

    let (_, body) = get_json(&client, "/api/v1/views").await;
    assert_eq!(body.as_array().map(|v| v.len()), Some(6));
}
