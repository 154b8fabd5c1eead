use std::sync::Arc;

use serde::Serialize;

use crate::adapters::{ArticlePageAdapter, SimulatedFeedAdapter, SourceAdapter};
use crate::fetcher::PageFetcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    WebPage,
    SimulatedFeed,
}

/// Static description of a registered source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub name: &'static str,
    pub kind: SourceKind,
    pub url: Option<&'static str>,
    pub description: &'static str,
    pub data_type: &'static str,
    pub update_frequency: &'static str,
}

pub const CATALOG: [SourceInfo; 5] = [
    SourceInfo {
        name: "Vogue",
        kind: SourceKind::WebPage,
        url: Some("https://www.vogue.com/fashion/trends"),
        description: "Runway coverage and trend reports",
        data_type: "editorial articles",
        update_frequency: "daily",
    },
    SourceInfo {
        name: "Business of Fashion",
        kind: SourceKind::WebPage,
        url: Some("https://www.businessoffashion.com/news"),
        description: "Industry news and market analysis",
        data_type: "news articles",
        update_frequency: "daily",
    },
    SourceInfo {
        name: "Who What Wear",
        kind: SourceKind::WebPage,
        url: Some("https://www.whowhatwear.com/street-style"),
        description: "Street style and celebrity looks",
        data_type: "style articles",
        update_frequency: "daily",
    },
    SourceInfo {
        name: "Instagram",
        kind: SourceKind::SimulatedFeed,
        url: None,
        description: "Hashtag and influencer trend signals",
        data_type: "social posts",
        update_frequency: "hourly",
    },
    SourceInfo {
        name: "Fast Fashion",
        kind: SourceKind::SimulatedFeed,
        url: None,
        description: "Product launches and bestsellers from Zara, ASOS and H&M",
        data_type: "product listings",
        update_frequency: "weekly",
    },
];

/// One adapter per catalog entry. Web pages share the given fetcher.
pub fn default_adapters(fetcher: Arc<dyn PageFetcher>) -> Vec<Arc<dyn SourceAdapter>> {
    CATALOG
        .iter()
        .map(|info| -> Arc<dyn SourceAdapter> {
            match (info.kind, info.url) {
                (SourceKind::WebPage, Some(url)) => {
                    Arc::new(ArticlePageAdapter::new(info.name, url, fetcher.clone()))
                }
                _ if info.name == "Instagram" => Arc::new(SimulatedFeedAdapter::instagram()),
                _ => Arc::new(SimulatedFeedAdapter::fast_fashion()),
            }
        })
        .collect()
}

/// Adapters whose names match `names` (case-insensitive). Unknown names
/// are ignored; an empty or fully unknown selection keeps everything.
pub fn select_adapters(
    adapters: &[Arc<dyn SourceAdapter>],
    names: &[String],
) -> Vec<Arc<dyn SourceAdapter>> {
    let selected: Vec<Arc<dyn SourceAdapter>> = adapters
        .iter()
        .filter(|a| names.iter().any(|n| n.trim().eq_ignore_ascii_case(a.name())))
        .cloned()
        .collect();
    if selected.is_empty() {
        adapters.to_vec()
    } else {
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    #[test]
    fn default_adapters_follow_catalog_order() {
        let adapters = default_adapters(Arc::new(MockFetcher::new()));
        let names: Vec<&str> = adapters.iter().map(|a| a.name()).collect();
        let expected: Vec<&str> = CATALOG.iter().map(|s| s.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn selection_is_case_insensitive_and_ignores_unknown() {
        let adapters = default_adapters(Arc::new(MockFetcher::new()));
        let picked = select_adapters(&adapters, &["vogue".into(), "myspace".into()]);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name(), "Vogue");

        let all = select_adapters(&adapters, &["myspace".into()]);
        assert_eq!(all.len(), CATALOG.len());
    }
}
