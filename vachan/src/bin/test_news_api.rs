use vachan::filter::{sort_by_recency, FilterSpec};
use vachan::providers::newsapi::NewsApiProvider;
use vachan::providers::{Edition, NewsProvider};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = common::Config::default();
    let provider = match NewsApiProvider::from_config(&config) {
        Ok(p) => p,
        Err(e) => {
            println!("✗ Cannot build provider: {:#}", e);
            println!("  Set {} to a NewsAPI key and retry.", config.news_api_key_env());
            return;
        }
    };

    for edition in Edition::ALL {
        println!("\n{}", "=".repeat(60));
        println!("Testing: {} edition ({})", edition, config.news_api_url());
        println!("{}", "=".repeat(60));

        match provider.fetch_headlines(edition).await {
            Ok(articles) => {
                println!("✓ Success!");
                println!("  Articles: {}", articles.len());

                let latest = sort_by_recency(&articles);
                let undated = articles.iter().filter(|a| a.published_at.is_none()).count();
                println!("  Without timestamp: {}", undated);
                let bbc = vachan::filter(&articles, &FilterSpec::builder().source("BBC News").build());
                println!("  From BBC News: {}", bbc.len());

                if !latest.is_empty() {
                    println!("\n  Latest 3:");
                    for (i, a) in latest.iter().take(3).enumerate() {
                        println!("    {}. {} [{}]", i + 1, a.title, a.source);
                        println!(
                            "       Published: {}",
                            a.published_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "unknown".into())
                        );
                        println!("       URL: {}", a.url.as_deref().unwrap_or("none"));
                    }
                }
            }
            Err(e) => {
                println!("✗ Failed: {:#}", e);
            }
        }
    }
}
