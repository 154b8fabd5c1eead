use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fashioning_common::{Config, TrendPublisher};
use fashioning_index::AlgoliaBackend;
use fashioning_scout::{
    sources::{default_adapters, select_adapters},
    Aggregator, EnrichmentRequest, HttpFetcher,
};

/// Run one aggregation pass over the configured trend sources.
#[derive(Parser, Debug)]
#[command(name = "scout")]
struct Args {
    /// Source names to include (default: all).
    #[arg(long, value_delimiter = ',')]
    sources: Vec<String>,

    /// Only keep trends in these categories.
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,

    /// Only keep trends touching these regions.
    #[arg(long, value_delimiter = ',')]
    regions: Vec<String>,

    /// Skip publishing to the search index.
    #[arg(long)]
    dry_run: bool,

    /// Print accepted trends as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fashioning=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Fashioning scout starting...");

    let config = Config::from_env()?;
    let fetcher = Arc::new(HttpFetcher::new(
        &config.scraper_user_agent,
        Duration::from_secs(config.http_timeout_secs),
    )?);

    let request = EnrichmentRequest {
        sources: args.sources,
        categories: args.categories,
        regions: args.regions,
        ..Default::default()
    };
    let adapters = select_adapters(&default_adapters(fetcher), &request.sources);
    let aggregator = Aggregator::new(adapters).with_focus(request.focus());

    let run = aggregator.run().await?;
    for failure in &run.errors {
        info!(source = %failure.source, cause = %failure.cause, "Source failed");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&run.trends)?);
    }

    if args.dry_run {
        info!(trends = run.trends.len(), "Dry run, not publishing");
        return Ok(());
    }

    match config.algolia() {
        Some(settings) => {
            let backend = AlgoliaBackend::new(&settings);
            let written = backend.publish(&run.trends).await?;
            info!(written, index = %settings.trends_index, "Published trends");
        }
        None => info!("Search index not configured, skipping publish"),
    }

    Ok(())
}
