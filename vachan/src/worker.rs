use chrono::Utc;
use std::sync::Arc;
use tokio::select;
use tokio::sync::Notify;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::providers::{fetch_or_fallback, Edition, NewsProvider};
use crate::store::ArticleStore;

/// One refresh pass: pull every edition, swap it into the store and redraw the trending sample.
pub async fn refresh_once(
    store: &ArticleStore,
    provider: Option<&dyn NewsProvider>,
    trending_count: usize,
) {
    for edition in Edition::ALL {
        let articles = match provider {
            Some(p) => fetch_or_fallback(p, edition).await,
            None => edition.fallback().to_vec(),
        };
        info!(%edition, count = articles.len(), "worker: storing headlines");
        store.replace_headlines(edition, articles).await;
    }

    store.reshuffle_trending(trending_count).await;
    store.mark_refreshed(Utc::now()).await;
}

/// Top-level background worker. Refreshes the store every `interval` until
/// `shutdown_notify` is signalled.
pub async fn run_refresh_worker(
    store: ArticleStore,
    provider: Option<Arc<dyn NewsProvider>>,
    config: common::Config,
    shutdown_notify: Arc<Notify>,
) -> anyhow::Result<()> {
    let interval = Duration::from_secs(config.refresh_interval_seconds());
    let trending_count = config.trending_count();

    match &provider {
        Some(p) => info!(provider = p.name(), ?interval, "worker: starting refresh loop"),
        None => warn!(?interval, "worker: no news provider configured, serving built-in headlines"),
    }

    loop {
        info!("worker: refreshing headlines");
        refresh_once(&store, provider.as_deref(), trending_count).await;

        let counts = store.counts().await;
        info!(
            trending = counts.trending,
            world = counts.world,
            indian = counts.indian,
            "worker: refresh complete"
        );

        select! {
            _ = tokio::time::sleep(interval) => {
                // Loop again
            },
            _ = shutdown_notify.notified() => {
                info!("worker: shutdown requested, exiting loop");
                break;
            }
        }
    }

    info!("worker: cleanup complete");
    Ok(())
}
