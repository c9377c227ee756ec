use mockito::Matcher;
use vachan::dataset;
use vachan::providers::newsapi::NewsApiProvider;
use vachan::providers::{fetch_or_fallback, Edition, NewsProvider};
use vachan::FactCheckStatus;

const HEADLINES_BODY: &str = r#"{
    "status": "ok",
    "totalResults": 3,
    "articles": [
        {
            "source": {"id": "bbc-news", "name": "BBC News"},
            "author": "BBC News",
            "title": "Markets rally after rate decision",
            "description": "Shares rose sharply on Thursday.",
            "url": "https://www.bbc.co.uk/news/business-1",
            "urlToImage": "https://ichef.bbci.co.uk/1.jpg",
            "publishedAt": "2025-03-13T09:30:00Z",
            "content": "Shares rose sharply on Thursday after... [+1200 chars]"
        },
        {
            "source": {"id": null, "name": null},
            "author": null,
            "title": null,
            "description": null,
            "url": "https://example.com/untitled",
            "urlToImage": null,
            "publishedAt": null,
            "content": null
        },
        {
            "source": {"id": null, "name": "The Hindu"},
            "title": "Monsoon update",
            "description": "",
            "content": "Heavy rain expected in Kerala.",
            "url": "https://www.thehindu.com/news/monsoon",
            "publishedAt": "not a date"
        }
    ]
}"#;

fn provider(server: &mockito::Server) -> NewsApiProvider {
    NewsApiProvider::new(format!("{}/v2/top-headlines", server.url()), "test-key")
        .expect("build provider")
        .with_editions("en", "in")
        .with_page_size(10)
}

#[tokio::test]
async fn test_world_headlines_are_normalized() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("language".into(), "en".into()),
            Matcher::UrlEncoded("pageSize".into(), "10".into()),
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(HEADLINES_BODY)
        .create_async()
        .await;

    let articles = provider(&server)
        .fetch_headlines(Edition::World)
        .await
        .expect("fetch headlines");

    assert_eq!(articles.len(), 3);

    let first = &articles[0];
    assert_eq!(first.title, "Markets rally after rate decision");
    assert_eq!(first.content, "Shares rose sharply on Thursday.");
    assert_eq!(first.source, "BBC News");
    assert_eq!(first.url.as_deref(), Some("https://www.bbc.co.uk/news/business-1"));
    assert_eq!(first.published_at, Some("2025-03-13T09:30:00Z".parse().unwrap()));
    assert_eq!(first.fact_check.status, FactCheckStatus::Unverified);
    assert_eq!(first.fact_check.sources, vec!["BBC News".to_string()]);

    let second = &articles[1];
    assert_eq!(second.title, "Untitled");
    assert_eq!(second.content, "No content available");
    assert_eq!(second.source, "Unknown Source");
    assert!(second.published_at.is_none());

    let third = &articles[2];
    assert_eq!(third.content, "Heavy rain expected in Kerala.");
    assert!(third.published_at.is_none());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_indian_edition_requests_country() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("country".into(), "in".into()),
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "ok", "totalResults": 0, "articles": []}"#)
        .create_async()
        .await;

    let articles = provider(&server)
        .fetch_headlines(Edition::Indian)
        .await
        .expect("fetch headlines");
    assert!(articles.is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid or incorrect."}"#)
        .expect(1)
        .create_async()
        .await;

    let result = provider(&server).fetch_headlines(Edition::World).await;

    assert!(result.is_err());
    let err = result.unwrap_err().to_string();
    assert!(err.contains("401"));
    assert!(err.contains("API key is invalid"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_in_body_is_reported() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "error", "code": "rateLimited", "message": "You have made too many requests."}"#)
        .create_async()
        .await;

    let result = provider(&server).fetch_headlines(Edition::World).await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("rateLimited"));
}

#[tokio::test]
async fn test_server_errors_are_retried_then_fall_back() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .expect(2)
        .create_async()
        .await;

    let provider = provider(&server).with_retries(2);
    let articles = fetch_or_fallback(&provider, Edition::Indian).await;

    assert_eq!(articles, dataset::indian_fallback());
    mock.assert_async().await;
}
