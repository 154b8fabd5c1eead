use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

use algolia_client::{AlgoliaClient, AlgoliaError, BatchOperation, SearchParams, SearchResult};
use anyhow::Context;
use async_trait::async_trait;
use fashioning_common::{AlgoliaSettings, FashioningError, Trend, TrendPublisher};
use tracing::info;

use crate::backend::{page_count, Facet, Facets, SearchBackend, SearchRequest, SearchResponse};

/// Records per batch write.
const PUBLISH_BATCH_SIZE: usize = 10;

/// The remote trends index.
pub struct AlgoliaBackend {
    client: AlgoliaClient,
    index: String,
    closed: AtomicBool,
}

impl AlgoliaBackend {
    pub fn new(settings: &AlgoliaSettings) -> Self {
        Self::with_client(
            AlgoliaClient::new(&settings.app_id, &settings.api_key),
            &settings.trends_index,
        )
    }

    pub fn with_client(client: AlgoliaClient, index: &str) -> Self {
        info!(app_id = client.app_id(), index, "Search index configured");
        Self {
            client,
            index: index.to_string(),
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<(), FashioningError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(FashioningError::BackendUnavailable(
                "search index handle is closed".to_string(),
            ));
        }
        Ok(())
    }
}

/// `category:'luxury' AND regions:'North America'`
pub fn build_filters(category: Option<&str>, region: Option<&str>) -> Option<String> {
    let clauses: Vec<String> = [("category", category), ("regions", region)]
        .into_iter()
        .filter_map(|(attr, value)| {
            let value = value?.trim();
            (!value.is_empty()).then(|| format!("{attr}:'{}'", value.replace('\'', "\\'")))
        })
        .collect();
    (!clauses.is_empty()).then(|| clauses.join(" AND "))
}

fn unavailable(err: AlgoliaError) -> FashioningError {
    FashioningError::BackendUnavailable(err.to_string())
}

#[async_trait]
impl SearchBackend for AlgoliaBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, FashioningError> {
        self.ensure_open()?;
        let page_size = request.effective_page_size();
        let params = SearchParams {
            query: request.query.trim().to_string(),
            page: request.page,
            hits_per_page: page_size,
            filters: build_filters(request.category.as_deref(), request.region.as_deref()),
            facets: vec![Facet::Category.to_string(), Facet::Regions.to_string()],
        };

        let result: SearchResult<Trend> = self
            .client
            .search(&self.index, &params)
            .await
            .map_err(unavailable)?;

        let mut facets = Facets::default();
        for (name, counts) in result.facets {
            match name.parse::<Facet>() {
                Ok(Facet::Category) => facets.category = counts,
                Ok(Facet::Regions) => facets.regions = counts,
                Err(_) => {}
            }
        }

        Ok(SearchResponse {
            hits: result.hits,
            total: result.nb_hits,
            page: result.page,
            page_count: page_count(result.nb_hits, page_size),
            facets,
            elapsed_ms: result.processing_time_ms as f64,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<Trend>, FashioningError> {
        self.ensure_open()?;
        self.client
            .get_object(&self.index, id)
            .await
            .map_err(unavailable)
    }

    async fn facet_values(&self, facet: Facet) -> Result<BTreeSet<String>, FashioningError> {
        self.ensure_open()?;
        let hits = self
            .client
            .search_for_facet_values(&self.index, facet.as_str())
            .await
            .map_err(unavailable)?;
        Ok(hits.into_iter().map(|h| h.value).collect())
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!(index = %self.index, "Search index handle closed");
        }
    }

    fn name(&self) -> &str {
        "algolia"
    }
}

#[async_trait]
impl TrendPublisher for AlgoliaBackend {
    async fn publish(&self, trends: &[Trend]) -> anyhow::Result<usize> {
        self.ensure_open()?;
        let mut written = 0;
        for chunk in trends.chunks(PUBLISH_BATCH_SIZE) {
            let operations = chunk
                .iter()
                .map(|t| to_record(t).map(BatchOperation::update_object))
                .collect::<Result<Vec<_>, _>>()?;
            let resp = self
                .client
                .batch(&self.index, operations)
                .await
                .context("Batch write to search index failed")?;
            written += chunk.len();
            info!(task_id = resp.task_id, records = chunk.len(), "Batch written");
        }
        Ok(written)
    }

    fn name(&self) -> &str {
        "algolia"
    }
}

/// Index record for a trend: the id travels as `objectID` only, so the
/// record reads back through the `objectID` alias without a duplicate.
fn to_record(trend: &Trend) -> serde_json::Result<serde_json::Value> {
    let mut value = serde_json::to_value(trend)?;
    if let Some(obj) = value.as_object_mut() {
        if let Some(id) = obj.remove("id") {
            obj.insert("objectID".to_string(), id);
        }
    }
    Ok(value)
}
