pub mod algolia;
pub mod analytics;
pub mod backend;
pub mod facade;
pub mod synthetic;

pub use algolia::AlgoliaBackend;
pub use analytics::{CombinedStats, EnrichmentAnalytics, SourceSummary};
pub use backend::{
    page_count, Facet, Facets, SearchBackend, SearchRequest, SearchResponse, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
pub use facade::IndexFacade;
pub use synthetic::SyntheticDataset;
