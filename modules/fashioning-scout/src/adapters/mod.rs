pub mod article_page;
pub mod simulated;

use anyhow::Result;
use async_trait::async_trait;

use crate::fragment::RawFragment;

pub use article_page::ArticlePageAdapter;
pub use simulated::SimulatedFeedAdapter;

// --- SourceAdapter trait ---

/// One external source. A fetch failure stays local to this source.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawFragment>>;
    fn name(&self) -> &str;
}
