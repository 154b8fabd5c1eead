use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use fashioning_common::{Category, FashioningError, Region, Trend};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adapters::SourceAdapter;
use crate::canonicalizer::Canonicalizer;
use crate::fragment::RawFragment;

// --- Stats ---

#[derive(Debug, Default, Clone, Serialize)]
pub struct SourceStats {
    pub fragments: u32,
    pub accepted: u32,
    pub skipped: u32,
    pub out_of_focus: u32,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    pub sources: BTreeMap<String, SourceStats>,
    pub sources_failed: u32,
}

impl RunStats {
    /// Accepted trends per source.
    pub fn accepted_by_source(&self) -> BTreeMap<String, u32> {
        self.sources
            .iter()
            .map(|(name, s)| (name.clone(), s.accepted))
            .collect()
    }

    pub fn total_accepted(&self) -> u32 {
        self.sources.values().map(|s| s.accepted).sum()
    }

    pub fn total_skipped(&self) -> u32 {
        self.sources.values().map(|s| s.skipped).sum()
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Aggregation Run Complete ===")?;
        writeln!(f, "Sources ok:       {}", self.sources.len())?;
        writeln!(f, "Sources failed:   {}", self.sources_failed)?;
        writeln!(f, "Trends accepted:  {}", self.total_accepted())?;
        writeln!(f, "Fragments skipped:{}", self.total_skipped())?;
        if !self.sources.is_empty() {
            writeln!(f, "\nBy source:")?;
            for (name, s) in &self.sources {
                writeln!(
                    f,
                    "  {name}: {} accepted, {} skipped, {} out of focus",
                    s.accepted, s.skipped, s.out_of_focus
                )?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    pub source: String,
    pub cause: String,
}

/// Outcome of one aggregation pass. Trends are ordered by source
/// completion, then by parse order within a source.
#[derive(Debug, Default)]
pub struct AggregationRun {
    pub trends: Vec<Trend>,
    pub stats: RunStats,
    pub errors: Vec<SourceFailure>,
}

// --- Focus ---

/// Optional category/region hints. Empty lists admit everything.
#[derive(Debug, Clone, Default)]
pub struct Focus {
    pub categories: Vec<Category>,
    pub regions: Vec<Region>,
}

impl Focus {
    pub fn admits(&self, trend: &Trend) -> bool {
        let category_ok = self.categories.is_empty() || self.categories.contains(&trend.category);
        let region_ok =
            self.regions.is_empty() || self.regions.iter().any(|r| trend.regions.contains(r));
        category_ok && region_ok
    }
}

// --- Aggregator ---

pub struct Aggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    focus: Focus,
}

impl Aggregator {
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self {
            adapters,
            focus: Focus::default(),
        }
    }

    pub fn with_focus(mut self, focus: Focus) -> Self {
        self.focus = focus;
        self
    }

    pub fn source_names(&self) -> Vec<String> {
        self.adapters.iter().map(|a| a.name().to_string()).collect()
    }

    /// Fetch every source concurrently, exactly once each, and canonicalize
    /// what comes back. Fails only if every source failed.
    pub async fn run(&self) -> Result<AggregationRun, FashioningError> {
        let total_sources = self.adapters.len();
        info!(sources = total_sources, "Aggregation run starting");

        let outcomes: Vec<(String, anyhow::Result<Vec<RawFragment>>)> =
            stream::iter(self.adapters.iter().cloned().map(fetch_source).collect::<Vec<_>>())
                .buffer_unordered(total_sources.max(1))
                .collect()
                .await;

        let canonicalizer = Canonicalizer::new();
        let mut run = AggregationRun::default();

        for (source, result) in outcomes {
            let fragments = match result {
                Ok(fragments) => fragments,
                Err(e) => {
                    let err = FashioningError::AdapterFetch {
                        source_name: source.clone(),
                        message: format!("{e:#}"),
                    };
                    warn!(source = %source, error = %err, "Source failed, continuing");
                    run.stats.sources_failed += 1;
                    run.errors.push(SourceFailure {
                        source,
                        cause: format!("{e:#}"),
                    });
                    continue;
                }
            };

            let stats = run.stats.sources.entry(source.clone()).or_default();
            for fragment in fragments {
                stats.fragments += 1;
                match canonicalizer.ingest(fragment) {
                    Ok(trend) if self.focus.admits(&trend) => {
                        stats.accepted += 1;
                        run.trends.push(trend);
                    }
                    Ok(trend) => {
                        debug!(source = %source, trend = %trend.name, "Outside focus");
                        stats.out_of_focus += 1;
                    }
                    Err(e) => {
                        debug!(source = %source, error = %e, "Skipped fragment");
                        stats.skipped += 1;
                    }
                }
            }
        }

        if total_sources > 0 && run.errors.len() == total_sources {
            warn!(sources = total_sources, "Every source failed");
            return Err(FashioningError::AllSourcesFailed(total_sources));
        }

        info!("{}", run.stats);
        Ok(run)
    }
}

async fn fetch_source(adapter: Arc<dyn SourceAdapter>) -> (String, anyhow::Result<Vec<RawFragment>>) {
    let name = adapter.name().to_string();
    let result = adapter.fetch().await;
    (name, result)
}
