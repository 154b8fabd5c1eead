use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use fashioning_common::{Category, Demographics, FashioningError, Region, Trend};

use crate::backend::{page_count, Facet, Facets, SearchBackend, SearchRequest, SearchResponse};

/// Fixed in-memory corpus answering the same contract as the remote index.
/// Never mutated after construction.
pub struct SyntheticDataset {
    trends: Vec<Trend>,
}

impl SyntheticDataset {
    pub fn new(trends: Vec<Trend>) -> Self {
        Self { trends }
    }

    /// The three sample trends served while the remote index is down.
    pub fn sample() -> Self {
        Self::new(sample_trends(Utc::now()))
    }

    pub fn len(&self) -> usize {
        self.trends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }

    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        let started = Instant::now();
        let query = request.query.trim().to_lowercase();
        let category = request.category.as_deref().map(str::trim).filter(|c| !c.is_empty());
        let region = request.region.as_deref().map(str::trim).filter(|r| !r.is_empty());

        let matched: Vec<&Trend> = self
            .trends
            .iter()
            .filter(|t| query.is_empty() || t.searchable_text().contains(&query))
            .filter(|t| category.map_or(true, |c| t.category.as_str().eq_ignore_ascii_case(c)))
            .filter(|t| region.map_or(true, |r| t.in_region(r)))
            .collect();

        let page_size = request.effective_page_size();
        let total = matched.len() as u64;
        let start = (request.page as usize).saturating_mul(page_size as usize);
        let hits = matched
            .iter()
            .skip(start)
            .take(page_size as usize)
            .map(|t| (*t).clone())
            .collect();

        SearchResponse {
            hits,
            total,
            page: request.page,
            page_count: page_count(total, page_size),
            facets: tally_facets(&matched),
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }

    pub fn get(&self, id: &str) -> Option<Trend> {
        self.trends.iter().find(|t| t.id == id).cloned()
    }

    /// The full taxonomy, not just the values present in the corpus.
    pub fn facet_values(&self, facet: Facet) -> BTreeSet<String> {
        match facet {
            Facet::Category => Category::ALL.iter().map(|c| c.to_string()).collect(),
            Facet::Regions => Region::ALL.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[async_trait]
impl SearchBackend for SyntheticDataset {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, FashioningError> {
        Ok(SyntheticDataset::search(self, request))
    }

    async fn get(&self, id: &str) -> Result<Option<Trend>, FashioningError> {
        Ok(SyntheticDataset::get(self, id))
    }

    async fn facet_values(&self, facet: Facet) -> Result<BTreeSet<String>, FashioningError> {
        Ok(SyntheticDataset::facet_values(self, facet))
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

fn tally_facets(trends: &[&Trend]) -> Facets {
    let mut category = BTreeMap::new();
    let mut regions = BTreeMap::new();
    for t in trends {
        *category.entry(t.category.to_string()).or_insert(0) += 1;
        for r in &t.regions {
            *regions.entry(r.to_string()).or_insert(0) += 1;
        }
    }
    Facets { category, regions }
}

fn sample_trends(now: DateTime<Utc>) -> Vec<Trend> {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let demographics = |primary: &str, secondary: &str, female: u8| Demographics {
        primary_age: primary.to_string(),
        secondary_age: secondary.to_string(),
        gender_split: BTreeMap::from([
            ("female".to_string(), female),
            ("male".to_string(), 100 - female),
        ]),
    };
    let vogue_runway = Some("https://www.vogue.com/runway".to_string());

    vec![
        Trend {
            id: "trend_001".into(),
            name: "Sustainable Luxury Fashion".into(),
            description: "High-end fashion brands embracing eco-friendly materials and ethical production methods".into(),
            category: Category::Luxury,
            regions: BTreeSet::from([Region::Global]),
            source: "Vogue Runway".into(),
            source_url: vogue_runway.clone(),
            image_url: None,
            brand: Some("Stella McCartney".into()),
            trend_score: 0.92,
            growth_rate: 22.8,
            sustainability_score: 0.95,
            color_palette: strings(&["#228B22", "#8B4513", "#F5F5DC"]),
            demographics: demographics("26-35", "36-45", 70),
            social_mentions: 28_750,
            influencer_adoptions: 156,
            brand_adoptions: strings(&["Stella McCartney", "Patagonia", "Eileen Fisher"]),
            tags: strings(&["sustainable", "luxury", "eco-friendly"]),
            predicted_peak: now + Duration::days(90),
            created_at: now,
            updated_at: now,
        },
        Trend {
            id: "trend_002".into(),
            name: "Y2K Revival Streetwear".into(),
            description: "Early 2000s fashion making a comeback with metallic fabrics and futuristic accessories".into(),
            category: Category::Streetwear,
            regions: BTreeSet::from([Region::NorthAmerica, Region::Europe]),
            source: "Vogue Runway".into(),
            source_url: vogue_runway.clone(),
            image_url: None,
            brand: Some("Nike".into()),
            trend_score: 0.85,
            growth_rate: 15.2,
            sustainability_score: 0.6,
            color_palette: strings(&["#C0C0C0", "#FF1493", "#00FFFF"]),
            demographics: demographics("18-25", "26-35", 60),
            social_mentions: 15_420,
            influencer_adoptions: 89,
            brand_adoptions: strings(&["Nike", "Adidas", "Urban Outfitters"]),
            tags: strings(&["y2k", "streetwear", "retro"]),
            predicted_peak: now + Duration::days(60),
            created_at: now,
            updated_at: now,
        },
        Trend {
            id: "trend_003".into(),
            name: "Minimalist Athleisure".into(),
            description: "Clean, simple athletic wear that seamlessly transitions from gym to street".into(),
            category: Category::Athleisure,
            regions: BTreeSet::from([Region::NorthAmerica, Region::AsiaPacific]),
            source: "Vogue Runway".into(),
            source_url: vogue_runway,
            image_url: None,
            brand: Some("Lululemon".into()),
            trend_score: 0.78,
            growth_rate: 12.5,
            sustainability_score: 0.75,
            color_palette: strings(&["#FFFFFF", "#000000", "#808080"]),
            demographics: demographics("26-35", "36-45", 65),
            social_mentions: 12_340,
            influencer_adoptions: 67,
            brand_adoptions: strings(&["Lululemon", "Athleta", "Alo Yoga"]),
            tags: strings(&["minimalist", "athleisure", "clean"]),
            predicted_peak: now + Duration::days(45),
            created_at: now,
            updated_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &str) -> SearchRequest {
        SearchRequest {
            query: query.into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let data = SyntheticDataset::sample();
        let resp = data.search(&request(""));
        assert_eq!(resp.total, 3);
        assert_eq!(resp.page_count, 1);
        assert_eq!(resp.hits.len(), 3);
    }

    #[test]
    fn query_matches_name_description_or_category() {
        let data = SyntheticDataset::sample();
        assert_eq!(data.search(&request("Y2K")).total, 1);
        assert_eq!(data.search(&request("gym")).total, 1);
        assert_eq!(data.search(&request("athleisure")).total, 1);
        assert_eq!(data.search(&request("fashion")).total, 2);
        assert_eq!(data.search(&request("ballgown")).total, 0);
    }

    #[test]
    fn filters_are_anded() {
        let data = SyntheticDataset::sample();
        let resp = data.search(&SearchRequest {
            region: Some("North America".into()),
            ..Default::default()
        });
        assert_eq!(resp.total, 2);

        let resp = data.search(&SearchRequest {
            category: Some("STREETWEAR".into()),
            region: Some("North America".into()),
            ..Default::default()
        });
        assert_eq!(resp.total, 1);
        assert_eq!(resp.hits[0].id, "trend_002");

        let resp = data.search(&SearchRequest {
            category: Some("luxury".into()),
            region: Some("Europe".into()),
            ..Default::default()
        });
        assert_eq!(resp.total, 0);
        assert_eq!(resp.page_count, 0);
    }

    #[test]
    fn facets_are_tallied_over_the_filtered_set() {
        let data = SyntheticDataset::sample();
        let resp = data.search(&SearchRequest {
            region: Some("North America".into()),
            page_size: 1,
            ..Default::default()
        });
        assert_eq!(resp.hits.len(), 1);
        assert_eq!(resp.facets.category.len(), 2);
        assert_eq!(resp.facets.category["streetwear"], 1);
        assert_eq!(resp.facets.category["athleisure"], 1);
        assert_eq!(resp.facets.regions["North America"], 2);
        assert!(!resp.facets.regions.contains_key("Global"));
    }

    #[test]
    fn pagination_holds_for_every_page_size() {
        let data = SyntheticDataset::sample();
        for page_size in 1..=5u32 {
            for page in 0..5u32 {
                let resp = data.search(&SearchRequest {
                    page,
                    page_size,
                    ..Default::default()
                });
                assert_eq!(resp.page_count, page_count(resp.total, page_size));
                assert!(resp.hits.len() <= page_size as usize);
                if page >= resp.page_count {
                    assert!(resp.hits.is_empty());
                }
            }
        }
    }

    #[test]
    fn get_by_id() {
        let data = SyntheticDataset::sample();
        assert_eq!(data.get("trend_003").unwrap().name, "Minimalist Athleisure");
        assert!(data.get("trend_999").is_none());
    }

    #[test]
    fn facet_values_are_the_taxonomy() {
        let data = SyntheticDataset::sample();
        let categories = data.facet_values(Facet::Category);
        assert_eq!(categories.len(), 10);
        assert!(categories.contains("avant-garde"));
        assert_eq!(categories, data.facet_values(Facet::Category));
        assert!(data.facet_values(Facet::Regions).contains("Middle East"));
    }
}
