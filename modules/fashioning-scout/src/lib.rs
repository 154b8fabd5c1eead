pub mod adapters;
pub mod canonicalizer;
pub mod classifier;
pub mod enrichment;
pub mod fetcher;
pub mod fragment;
pub mod pipeline;
pub mod scorer;
pub mod sources;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use adapters::SourceAdapter;
pub use canonicalizer::Canonicalizer;
pub use classifier::{classify, Classification};
pub use enrichment::{EnrichmentJob, EnrichmentRequest, EnrichmentService, JobState};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use fragment::RawFragment;
pub use pipeline::{AggregationRun, Aggregator, Focus, RunStats, SourceFailure, SourceStats};
