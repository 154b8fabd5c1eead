use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fashioning_api::{router, AppState};
use fashioning_assistant::{FashionAdvisor, GeminiClient, TextGenerator, Unconfigured};
use fashioning_common::{Config, TrendPublisher};
use fashioning_index::{AlgoliaBackend, IndexFacade, SearchBackend, SyntheticDataset};
use fashioning_scout::{sources::default_adapters, EnrichmentService, HttpFetcher};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fashioning=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let algolia = config.algolia().map(|s| Arc::new(AlgoliaBackend::new(&s)));
    let remote = algolia.clone().map(|b| b as Arc<dyn SearchBackend>);
    let publisher = algolia.map(|b| b as Arc<dyn TrendPublisher>);

    let fetcher = Arc::new(HttpFetcher::new(
        &config.scraper_user_agent,
        Duration::from_secs(config.http_timeout_secs),
    )?);

    let generator: Arc<dyn TextGenerator> = match &config.gemini_api_key {
        Some(key) => Arc::new(GeminiClient::new(key, &config.gemini_model)),
        None => Arc::new(Unconfigured),
    };

    let state = Arc::new(AppState {
        facade: IndexFacade::new(remote, Arc::new(SyntheticDataset::sample())),
        enrichment: EnrichmentService::new(default_adapters(fetcher), publisher),
        advisor: FashionAdvisor::new(generator),
    });

    let app = router(state.clone());

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Fashioning API starting on {addr}");
    info!(
        remote_index = state.facade.has_remote(),
        generator = state.advisor.generator_name(),
        "Serving"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.facade.shutdown().await;
    info!("Fashioning API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
