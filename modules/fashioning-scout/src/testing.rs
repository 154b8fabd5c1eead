// Test doubles for the aggregation pipeline.
//
// - MockFetcher (PageFetcher): HashMap-based URL→HTML
// - StaticAdapter (SourceAdapter): fixed fragments, optional delay
// - FailingAdapter (SourceAdapter): always errors
// - PanickingAdapter (SourceAdapter): panics mid-fetch
// - RecordingPublisher (TrendPublisher): keeps what it was handed

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use fashioning_common::{Trend, TrendPublisher};

use crate::adapters::SourceAdapter;
use crate::fetcher::PageFetcher;
use crate::fragment::RawFragment;

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Returns `Err` for unregistered URLs.
pub struct MockFetcher {
    pages: HashMap<String, String>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    pub fn on_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("MockFetcher: no page registered for {url}"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

pub struct StaticAdapter {
    name: String,
    fragments: Vec<RawFragment>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticAdapter {
    pub fn new(name: &str, fragments: Vec<RawFragment>) -> Self {
        Self {
            name: name.to_string(),
            fragments,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Adapter yielding one fragment per title.
    pub fn with_titles(name: &str, titles: &[&str]) -> Self {
        let fragments = titles.iter().map(|t| fragment(name, t)).collect();
        Self::new(name, fragments)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for StaticAdapter {
    async fn fetch(&self) -> Result<Vec<RawFragment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        Ok(self.fragments.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub struct FailingAdapter {
    name: String,
    calls: AtomicUsize,
}

impl FailingAdapter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for FailingAdapter {
    async fn fetch(&self) -> Result<Vec<RawFragment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        bail!("{}: connection refused", self.name)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub struct PanickingAdapter {
    name: String,
}

impl PanickingAdapter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl SourceAdapter for PanickingAdapter {
    async fn fetch(&self) -> Result<Vec<RawFragment>> {
        panic!("{}: parser invariant broken", self.name)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// RecordingPublisher
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<Trend>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<Trend> {
        self.published.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TrendPublisher for RecordingPublisher {
    async fn publish(&self, trends: &[Trend]) -> Result<usize> {
        let mut published = self
            .published
            .lock()
            .map_err(|_| anyhow!("RecordingPublisher: poisoned"))?;
        published.extend_from_slice(trends);
        Ok(trends.len())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn fragment(source: &str, title: &str) -> RawFragment {
    RawFragment::builder().source(source).title(title).build()
}
