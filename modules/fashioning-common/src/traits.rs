use anyhow::Result;
use async_trait::async_trait;

use crate::types::Trend;

/// Destination for freshly aggregated trends (the remote search index).
#[async_trait]
pub trait TrendPublisher: Send + Sync {
    /// Upsert the batch. Returns the number of records written.
    async fn publish(&self, trends: &[Trend]) -> Result<usize>;
    fn name(&self) -> &str;
}
