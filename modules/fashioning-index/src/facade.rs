use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use fashioning_common::{FashioningError, Trend};
use tracing::{debug, warn};

use crate::analytics::{CombinedStats, EnrichmentAnalytics};
use crate::backend::{Facet, SearchBackend, SearchRequest, SearchResponse};
use crate::synthetic::SyntheticDataset;

/// Query entry point. Each call tries the remote index when one is
/// configured and answers from the synthetic dataset if that fails.
/// Remote errors are logged, never returned.
pub struct IndexFacade {
    remote: Option<Arc<dyn SearchBackend>>,
    fallback: Arc<SyntheticDataset>,
}

impl IndexFacade {
    pub fn new(remote: Option<Arc<dyn SearchBackend>>, fallback: Arc<SyntheticDataset>) -> Self {
        match &remote {
            Some(r) => debug!(backend = r.name(), "Index facade using remote backend"),
            None => warn!("No search index configured, serving synthetic dataset"),
        }
        Self { remote, fallback }
    }

    /// Synthetic data only.
    pub fn offline() -> Self {
        Self::new(None, Arc::new(SyntheticDataset::sample()))
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn search(&self, request: &SearchRequest) -> SearchResponse {
        let started = Instant::now();
        let mut response = self
            .serve(
                "search",
                |remote| remote.search(request),
                |local| local.search(request),
            )
            .await;
        response.elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        response
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Trend> {
        self.serve("get", |remote| remote.get(id), |local| local.get(id))
            .await
    }

    pub async fn facet_values(&self, facet: Facet) -> BTreeSet<String> {
        self.serve(
            "facet_values",
            |remote| remote.facet_values(facet),
            |local| local.facet_values(facet),
        )
        .await
    }

    /// Totals from a one-hit search plus the facet value counts.
    pub async fn combined_stats(&self) -> CombinedStats {
        let count_only = SearchRequest {
            page_size: 1,
            ..Default::default()
        };
        CombinedStats {
            trends_total: self.search(&count_only).await.total,
            categories: self.facet_values(Facet::Category).await.len(),
            regions: self.facet_values(Facet::Regions).await.len(),
        }
    }

    /// Analytics over the first `sample` trends of an unfiltered search.
    pub async fn analytics(&self, sample: u32) -> EnrichmentAnalytics {
        let response = self
            .search(&SearchRequest {
                page_size: sample,
                ..Default::default()
            })
            .await;
        EnrichmentAnalytics::from_trends(response.total, &response.hits)
    }

    /// Close the remote handle. Safe to call more than once.
    pub async fn shutdown(&self) {
        if let Some(remote) = &self.remote {
            remote.close().await;
        }
    }

    /// The one place that decides between remote and synthetic.
    async fn serve<'a, T, Fut>(
        &'a self,
        operation: &'static str,
        remote_call: impl FnOnce(&'a dyn SearchBackend) -> Fut,
        local_call: impl FnOnce(&SyntheticDataset) -> T,
    ) -> T
    where
        Fut: Future<Output = Result<T, FashioningError>> + 'a,
    {
        if let Some(remote) = &self.remote {
            match remote_call(remote.as_ref()).await {
                Ok(value) => return value,
                Err(e) => warn!(
                    operation,
                    backend = remote.name(),
                    error = %e,
                    "Remote index failed, serving synthetic data"
                ),
            }
        }
        local_call(self.fallback.as_ref())
    }
}
