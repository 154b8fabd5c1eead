use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use fashioning_common::{FashioningError, Trend};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

// --- Request / response ---

/// A faceted search. `page` is zero-indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub category: Option<String>,
    pub region: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: None,
            region: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchRequest {
    /// Page size forced into `[1, MAX_PAGE_SIZE]`.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Value -> count over the matched result set, per facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facets {
    pub category: BTreeMap<String, u64>,
    pub regions: BTreeMap<String, u64>,
}

/// Same shape whichever backend answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<Trend>,
    pub total: u64,
    pub page: u32,
    pub page_count: u32,
    pub facets: Facets,
    pub elapsed_ms: f64,
}

/// `ceil(total / page_size)`; zero results means zero pages.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    let size = page_size.max(1) as u64;
    total.div_ceil(size) as u32
}

// --- Facet ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Category,
    Regions,
}

impl Facet {
    pub fn as_str(self) -> &'static str {
        match self {
            Facet::Category => "category",
            Facet::Regions => "regions",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = FashioningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" | "categories" => Ok(Facet::Category),
            "region" | "regions" => Ok(Facet::Regions),
            other => Err(FashioningError::Validation(format!("unknown facet: {other}"))),
        }
    }
}

// --- SearchBackend trait ---

#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, FashioningError>;
    async fn get(&self, id: &str) -> Result<Option<Trend>, FashioningError>;
    async fn facet_values(&self, facet: Facet) -> Result<BTreeSet<String>, FashioningError>;
    /// Release the backend's connections. Idempotent.
    async fn close(&self) {}
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(3, 1), 3);
    }

    #[test]
    fn page_size_is_clamped() {
        let mut req = SearchRequest::default();
        req.page_size = 0;
        assert_eq!(req.effective_page_size(), 1);
        req.page_size = 500;
        assert_eq!(req.effective_page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn facet_names_parse_loosely() {
        assert_eq!("Regions".parse::<Facet>().unwrap(), Facet::Regions);
        assert_eq!("region".parse::<Facet>().unwrap(), Facet::Regions);
        assert!("brand".parse::<Facet>().is_err());
    }
}
