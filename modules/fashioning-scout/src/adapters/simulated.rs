use anyhow::Result;
use async_trait::async_trait;

use super::SourceAdapter;
use crate::fragment::RawFragment;

/// A feed with no public API, stood in for by a fixed set of posts.
pub struct SimulatedFeedAdapter {
    source: String,
    posts: Vec<RawFragment>,
}

impl SimulatedFeedAdapter {
    pub fn new(source: &str, posts: Vec<RawFragment>) -> Self {
        Self {
            source: source.to_string(),
            posts,
        }
    }

    /// Hashtag-driven trends from Instagram.
    pub fn instagram() -> Self {
        let source = "Instagram";
        Self::new(
            source,
            vec![
                RawFragment::builder()
                    .source(source)
                    .title("Y2K Fashion Revival")
                    .description("Early 2000s fashion making a comeback on Instagram")
                    .tags(strings(&["y2k", "viral", "instagram"]))
                    .social_mentions(15_000)
                    .brand_adoptions(strings(&["Zara", "H&M", "ASOS"]))
                    .color_palette(strings(&["#FF69B4", "#00CED1", "#FFD700"]))
                    .sustainability_score(0.4)
                    .build(),
                RawFragment::builder()
                    .source(source)
                    .title("Cottagecore Aesthetic")
                    .description("Romantic, rural-inspired fashion trending on social media")
                    .tags(strings(&["cottagecore", "sustainable", "romantic"]))
                    .social_mentions(12_000)
                    .brand_adoptions(strings(&["Sustainable Brands"]))
                    .color_palette(strings(&["#8FBC8F", "#DEB887", "#F5DEB3"]))
                    .sustainability_score(0.8)
                    .build(),
            ],
        )
    }

    /// Product launches and bestsellers across Zara, ASOS and H&M.
    pub fn fast_fashion() -> Self {
        let source = "Fast Fashion";
        Self::new(
            source,
            vec![
                RawFragment::builder()
                    .source(source)
                    .title("Oversized Blazer Trend")
                    .description("Oversized blazers dominating fast fashion collections")
                    .tags(strings(&["oversized", "blazer", "fast fashion"]))
                    .social_mentions(10_000)
                    .brand_adoptions(strings(&["Zara", "ASOS", "H&M"]))
                    .color_palette(strings(&["#2F4F4F", "#696969", "#A9A9A9"]))
                    .sustainability_score(0.3)
                    .build(),
                RawFragment::builder()
                    .source(source)
                    .title("Athleisure Evolution")
                    .description("Athleisure wear becoming more sophisticated and versatile")
                    .tags(strings(&["athleisure", "comfort", "versatile"]))
                    .social_mentions(18_000)
                    .brand_adoptions(strings(&["Nike", "Adidas", "Lululemon"]))
                    .color_palette(strings(&["#4169E1", "#32CD32", "#FF6347"]))
                    .sustainability_score(0.6)
                    .build(),
            ],
        )
    }
}

#[async_trait]
impl SourceAdapter for SimulatedFeedAdapter {
    async fn fetch(&self) -> Result<Vec<RawFragment>> {
        Ok(self.posts.clone())
    }

    fn name(&self) -> &str {
        &self.source
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
