use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use fashioning_common::{Demographics, FashioningError, Trend};

use crate::classifier::{classify, Classification};
use crate::fragment::{dedup_preserving_order, RawFragment};
use crate::scorer;

/// Shortest title (in characters, after trimming) a fragment may carry.
pub const MIN_TITLE_CHARS: usize = 10;

const FALLBACK_DESCRIPTION: &str = "Trend analysis and insights from fashion experts.";
const DEFAULT_PALETTE: [&str; 3] = ["#000000", "#FFFFFF", "#808080"];
const DEFAULT_SUSTAINABILITY: f64 = 0.5;

/// Turns raw fragments into canonical trends for one aggregation batch.
///
/// Ids are `{source_slug}_{sequence}_{batch_timestamp}`. The sequence is
/// shared by every adapter in the batch, so ids are unique within a run;
/// two runs started in the same second may collide.
pub struct Canonicalizer {
    sequence: AtomicU64,
    batch_started: DateTime<Utc>,
}

impl Canonicalizer {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(batch_started: DateTime<Utc>) -> Self {
        Self {
            sequence: AtomicU64::new(0),
            batch_started,
        }
    }

    /// Classify, score and canonicalize in one step.
    pub fn ingest(&self, fragment: RawFragment) -> Result<Trend, FashioningError> {
        let classification = classify(&fragment.classification_text());
        let score = scorer::trend_score(
            fragment.social_mentions,
            fragment.influencer_count,
            fragment.brands().len() as u64,
        );
        let growth = scorer::growth_rate(fragment.tags.len());
        self.canonicalize(fragment, classification, score, growth)
    }

    pub fn canonicalize(
        &self,
        fragment: RawFragment,
        classification: Classification,
        trend_score: f64,
        growth_rate: f64,
    ) -> Result<Trend, FashioningError> {
        let title = fragment.title.trim();
        if title.chars().count() < MIN_TITLE_CHARS {
            return Err(FashioningError::Validation(format!(
                "title too short ({} chars): {title:?}",
                title.chars().count()
            )));
        }
        if !trend_score.is_finite() || !growth_rate.is_finite() {
            return Err(FashioningError::Validation(format!(
                "non-finite score for {title:?}"
            )));
        }

        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let id = format!(
            "{}_{}_{}",
            source_slug(&fragment.source),
            seq,
            self.batch_started.timestamp()
        );

        let now = Utc::now();
        let description = match fragment.description.trim() {
            "" => FALLBACK_DESCRIPTION.to_string(),
            d => d.to_string(),
        };
        let mut regions = classification.regions;
        if regions.is_empty() {
            regions.insert(fashioning_common::Region::Global);
        }
        let brand_adoptions = fragment.brands();

        Ok(Trend {
            id,
            name: title.to_string(),
            description,
            category: classification.category,
            regions,
            source: fragment.source,
            source_url: fragment.url.filter(|u| !u.is_empty()),
            image_url: fragment.images.into_iter().next(),
            brand: fragment.brand,
            trend_score: trend_score.clamp(0.0, 1.0),
            growth_rate,
            sustainability_score: fragment
                .sustainability_score
                .unwrap_or(DEFAULT_SUSTAINABILITY)
                .clamp(0.0, 1.0),
            color_palette: fragment
                .color_palette
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()),
            demographics: Demographics::default(),
            social_mentions: fragment.social_mentions,
            influencer_adoptions: fragment.influencer_count,
            brand_adoptions,
            tags: dedup_preserving_order(fragment.tags),
            predicted_peak: scorer::predicted_peak(now, growth_rate),
            created_at: now,
            updated_at: now,
        })
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// "Business of Fashion" -> "business_of_fashion"
pub fn source_slug(source: &str) -> String {
    let mut slug = String::with_capacity(source.len());
    for c in source.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "source".to_string()
    } else {
        slug.to_string()
    }
}
