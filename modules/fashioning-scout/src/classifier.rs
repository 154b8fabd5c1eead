use std::collections::BTreeSet;

use fashioning_common::{Category, Region};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub regions: BTreeSet<Region>,
}

/// Keyword-overlap classification. Pure: the same text always yields the
/// same category and regions.
pub fn classify(text: &str) -> Classification {
    let lower = text.to_lowercase();
    Classification {
        category: classify_category(&lower),
        regions: detect_regions(&lower),
    }
}

/// Category with the most distinct keyword hits. Ties keep the earlier
/// category; no hits at all means casual.
fn classify_category(lower: &str) -> Category {
    let mut best = Category::Casual;
    let mut best_hits = 0;
    for category in Category::ALL {
        let hits = category
            .keywords()
            .iter()
            .filter(|kw| lower.contains(*kw))
            .count();
        if hits > best_hits {
            best = category;
            best_hits = hits;
        }
    }
    best
}

fn detect_regions(lower: &str) -> BTreeSet<Region> {
    let mut regions: BTreeSet<Region> = Region::ALL
        .into_iter()
        .filter(|r| r.keywords().iter().any(|kw| lower.contains(kw)))
        .collect();
    if regions.is_empty() {
        regions.insert(Region::Global);
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_casual_and_global() {
        let c = classify("");
        assert_eq!(c.category, Category::Casual);
        assert_eq!(c.regions, BTreeSet::from([Region::Global]));
    }

    #[test]
    fn highest_keyword_count_wins() {
        let c = classify("Haute couture goes green with recycled, organic fabrics");
        // luxury: haute, couture = 2; sustainable: green, recycled, organic = 3
        assert_eq!(c.category, Category::Sustainable);
    }

    #[test]
    fn ties_go_to_first_declared_category() {
        // luxury: luxury = 1; vintage: retro = 1
        let c = classify("luxury retro");
        assert_eq!(c.category, Category::Luxury);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let c = classify("SNEAKERHEADS love Streetwear drops");
        assert_eq!(c.category, Category::Streetwear);
    }

    #[test]
    fn detects_multiple_regions() {
        let c = classify("From Paris runways to Tokyo streets");
        assert_eq!(c.regions, BTreeSet::from([Region::Europe, Region::AsiaPacific]));
    }

    #[test]
    fn oversized_blazer_classifies_as_streetwear() {
        let c = classify("Oversized Blazer Trend  oversized blazer ");
        assert_eq!(c.category, Category::Streetwear);
        assert_eq!(c.regions, BTreeSet::from([Region::Global]));
    }
}
