use typed_builder::TypedBuilder;

/// Unclassified trend text plus engagement signals, as extracted by a
/// source adapter. Lives only until canonicalization.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RawFragment {
    #[builder(setter(into))]
    pub source: String,
    #[builder(setter(into))]
    pub title: String,
    #[builder(default, setter(into))]
    pub description: String,
    #[builder(default)]
    pub tags: Vec<String>,
    #[builder(default, setter(strip_option, into))]
    pub brand: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub url: Option<String>,
    #[builder(default)]
    pub images: Vec<String>,
    #[builder(default)]
    pub social_mentions: u64,
    #[builder(default)]
    pub influencer_count: u64,
    #[builder(default)]
    pub brand_adoptions: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub color_palette: Option<Vec<String>>,
    #[builder(default, setter(strip_option))]
    pub sustainability_score: Option<f64>,
}

impl RawFragment {
    /// Title, description, tags and brand joined for keyword classification.
    pub fn classification_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.description,
            self.tags.join(" "),
            self.brand.as_deref().unwrap_or_default()
        )
    }

    /// Distinct brands behind the fragment: the adoption list plus the
    /// page-level brand, if any.
    pub fn brands(&self) -> Vec<String> {
        let mut all = self.brand_adoptions.clone();
        if let Some(brand) = &self.brand {
            all.push(brand.clone());
        }
        dedup_preserving_order(all)
    }
}

/// Trim, drop empties, and remove later duplicates (case-insensitive).
pub(crate) fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_text_joins_all_parts() {
        let f = RawFragment::builder()
            .source("Vogue")
            .title("Quiet Luxury")
            .description("Understated pieces")
            .tags(vec!["cashmere".into(), "neutral".into()])
            .brand("The Row")
            .build();
        assert_eq!(
            f.classification_text(),
            "Quiet Luxury Understated pieces cashmere neutral The Row"
        );
    }

    #[test]
    fn brands_merge_adoptions_and_page_brand() {
        let f = RawFragment::builder()
            .source("Fast Fashion")
            .title("Oversized Blazer Trend")
            .brand_adoptions(vec!["Zara".into(), "ASOS".into()])
            .brand("zara")
            .build();
        assert_eq!(f.brands(), vec!["Zara".to_string(), "ASOS".to_string()]);
    }

    #[test]
    fn dedup_drops_blanks_and_repeats() {
        let out = dedup_preserving_order(vec![
            " y2k ".into(),
            "".into(),
            "Y2K".into(),
            "viral".into(),
        ]);
        assert_eq!(out, vec!["y2k".to_string(), "viral".to_string()]);
    }
}
