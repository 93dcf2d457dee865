use anyhow::Context;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use price_sync::config::Config;
use price_sync::pipeline;
use price_sync::store::CacheTable;
use trade_ingestor::discovery::discover_archive_dates;
use trade_ingestor::providers::pnw::PnwArchiveProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::default();

    let client = reqwest::Client::builder()
        .build()
        .context("building HTTP client")?;
    let provider = PnwArchiveProvider::with_client(client.clone(), config.archive_base_url.clone());

    let mut table = CacheTable::load(&config.cache_path)
        .with_context(|| format!("loading cache from {}", config.cache_path.display()))?;

    // No candidate list means nothing can run; discovery failures are fatal.
    let candidates = discover_archive_dates(&client, &config.index_url)
        .await
        .context("discovering published archives")?;

    info!(
        candidates = candidates.len(),
        cached = table.len(),
        concurrency = config.concurrency,
        "starting sync"
    );

    let summary = pipeline::run(&provider, candidates, config.concurrency, &mut table).await;

    // Losing the merge defeats the run; persistence failures are fatal too.
    table
        .persist(&config.cache_path)
        .with_context(|| format!("persisting cache to {}", config.cache_path.display()))?;

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed,
        total_days = table.len(),
        "cache persisted"
    );
    Ok(())
}
