use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FashioningError;

// --- Category ---

/// Closed category taxonomy. Declaration order is the classifier's
/// tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Luxury,
    Streetwear,
    Sustainable,
    Vintage,
    Minimalist,
    Maximalist,
    Athleisure,
    Formal,
    Casual,
    AvantGarde,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Luxury,
        Category::Streetwear,
        Category::Sustainable,
        Category::Vintage,
        Category::Minimalist,
        Category::Maximalist,
        Category::Athleisure,
        Category::Formal,
        Category::Casual,
        Category::AvantGarde,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Luxury => "luxury",
            Category::Streetwear => "streetwear",
            Category::Sustainable => "sustainable",
            Category::Vintage => "vintage",
            Category::Minimalist => "minimalist",
            Category::Maximalist => "maximalist",
            Category::Athleisure => "athleisure",
            Category::Formal => "formal",
            Category::Casual => "casual",
            Category::AvantGarde => "avant-garde",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FashioningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| FashioningError::Validation(format!("unknown category: {s}")))
    }
}

// --- Region ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Global,
    #[serde(rename = "North America")]
    NorthAmerica,
    Europe,
    #[serde(rename = "Asia Pacific")]
    AsiaPacific,
    #[serde(rename = "Latin America")]
    LatinAmerica,
    #[serde(rename = "Middle East")]
    MiddleEast,
    Africa,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Global,
        Region::NorthAmerica,
        Region::Europe,
        Region::AsiaPacific,
        Region::LatinAmerica,
        Region::MiddleEast,
        Region::Africa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Global => "Global",
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::AsiaPacific => "Asia Pacific",
            Region::LatinAmerica => "Latin America",
            Region::MiddleEast => "Middle East",
            Region::Africa => "Africa",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = FashioningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| FashioningError::Validation(format!("unknown region: {s}")))
    }
}

// --- Demographics ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub primary_age: String,
    pub secondary_age: String,
    /// Percentages keyed by gender; values sum to 100.
    pub gender_split: BTreeMap<String, u8>,
}

impl Default for Demographics {
    fn default() -> Self {
        Self {
            primary_age: "18-35".to_string(),
            secondary_age: "36-50".to_string(),
            gender_split: BTreeMap::from([("female".to_string(), 70), ("male".to_string(), 30)]),
        }
    }
}

// --- Trend ---

/// A canonical, scored, classified fashion trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    #[serde(alias = "objectID")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub regions: BTreeSet<Region>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub trend_score: f64,
    pub growth_rate: f64,
    pub sustainability_score: f64,
    pub color_palette: Vec<String>,
    pub demographics: Demographics,
    pub social_mentions: u64,
    pub influencer_adoptions: u64,
    pub brand_adoptions: Vec<String>,
    pub tags: Vec<String>,
    pub predicted_peak: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trend {
    pub fn in_region(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r.as_str() == region)
    }

    /// Text the synthetic search matches queries against.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.name, self.description, self.category).to_lowercase()
    }
}
