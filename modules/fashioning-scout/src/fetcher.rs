use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::debug;

// --- PageFetcher trait ---

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Raw HTML of the page at `url`.
    async fn fetch_html(&self, url: &str) -> Result<String>;
    fn name(&self) -> &str;
}

// --- Plain HTTP fetcher ---

/// Static HTML over reqwest with a browser-like user agent. No JS rendering.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let parsed = url::Url::parse(url).context("Invalid URL")?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            bail!("Only http/https URLs are allowed, got: {}", parsed.scheme());
        }

        let resp = self
            .client
            .get(parsed)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("{url} returned HTTP {}", status.as_u16());
        }

        let html = resp.text().await.context("Failed to read response body")?;
        debug!(url, bytes = html.len(), "Fetched page");
        Ok(html)
    }

    fn name(&self) -> &str {
        "http"
    }
}
