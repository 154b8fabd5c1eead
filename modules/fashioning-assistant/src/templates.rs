//! Deterministic replies used whenever the generative model is unavailable.

use fashioning_common::Trend;

use crate::prompts::{average_growth, dominant_category, join_or, regions_of, top_trend_lines};

pub fn trend_analysis(trend: &Trend) -> String {
    let palette = join_or(trend.color_palette.iter().take(3), "neutral tones");
    let brands = join_or(trend.brand_adoptions.iter().take(3), "emerging labels");

    format!(
        "## {name} Analysis\n\n\
         **Current status:** {name} is a {category} trend scoring {score:.2} and growing \
         at {growth}%.\n\n\
         **Market reach:** strongest in {regions}, led by the {primary} age group.\n\n\
         **Sustainability:** {sustainability:.0}% sustainability rating.\n\n\
         **Key colors:** {palette}\n\n\
         **Styling tips:**\n\
         - Build one statement piece into an otherwise simple outfit\n\
         - Pair with {palette_lead} to stay on palette\n\
         - Layer with existing wardrobe staples before buying new\n\n\
         **Shopping strategy:** start with pieces from {brands} and invest in \
         versatile items that outlast the peak.",
        name = trend.name,
        category = trend.category,
        score = trend.trend_score,
        growth = trend.growth_rate,
        regions = regions_of(trend),
        primary = trend.demographics.primary_age,
        sustainability = trend.sustainability_score * 100.0,
        palette_lead = trend
            .color_palette
            .first()
            .map(String::as_str)
            .unwrap_or("neutrals"),
    )
}

pub fn style_recommendations(trends: &[Trend]) -> String {
    let Some(top) = trends
        .iter()
        .max_by(|a, b| a.trend_score.total_cmp(&b.trend_score))
    else {
        return "I'd be happy to provide style recommendations! Could you tell me more \
                about your style preferences, the occasions you dress for, and the \
                categories you like?"
            .to_string();
    };

    format!(
        "## Personal Style Recommendations\n\n\
         **Top pick:** {name} ({category}), currently scoring {score:.2}.\n\n\
         **Color palette:** {palette}\n\n\
         **Brands to explore:** {brands}\n\n\
         **Also trending:**\n{others}\n\
         Mix one trend piece per outfit with basics you already own.",
        name = top.name,
        category = top.category,
        score = top.trend_score,
        palette = join_or(top.color_palette.iter().take(3), "neutral tones"),
        brands = join_or(top.brand_adoptions.iter().take(3), "emerging labels"),
        others = top_trend_lines(trends, 3),
    )
}

pub fn trend_predictions(trends: &[Trend]) -> String {
    if trends.is_empty() {
        return "Not enough current trend data to make predictions yet. Check back \
                after the next enrichment run."
            .to_string();
    }

    let dominant = dominant_category(trends)
        .map(|c| c.to_string())
        .unwrap_or_else(|| "mixed".to_string());

    format!(
        "## Fashion Predictions\n\n\
         Based on {count} current trends averaging {growth:.1}% growth, with {dominant} \
         leading.\n\n\
         **Emerging directions:**\n\
         - Sustainable Luxury: quality over quantity with transparent sourcing\n\
         - Tech-Integrated Style: smart fabrics and digital-first design\n\
         - Personalized Fashion: made-to-order and customizable pieces\n\n\
         **Timeline:** expect these to peak over the next 6 to 12 months.",
        count = trends.len(),
        growth = average_growth(trends),
    )
}

pub fn general() -> String {
    "I'm your fashion trend assistant. I can help with:\n\
     - Trend analysis: ask me to analyze a trend\n\
     - Style advice: ask what you should wear or for outfit ideas\n\
     - Predictions: ask what is coming next in fashion\n\
     - Market insights: which categories and regions are growing\n\n\
     What would you like to explore?"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::trend;
    use fashioning_common::Category;

    #[test]
    fn analysis_mentions_growth_and_sustainability() {
        let mut t = trend("Quiet Luxury", Category::Luxury, 0.92, 45.2);
        t.sustainability_score = 0.85;
        let text = trend_analysis(&t);
        assert!(text.contains("growing at 45.2%"));
        assert!(text.contains("85% sustainability"));
    }

    #[test]
    fn style_without_trends_asks_for_preferences() {
        assert!(style_recommendations(&[]).starts_with("I'd be happy to provide style recommendations!"));
    }

    #[test]
    fn style_leads_with_highest_score() {
        let trends = vec![
            trend("Low", Category::Casual, 0.2, 1.0),
            trend("High", Category::Formal, 0.9, 1.0),
        ];
        assert!(style_recommendations(&trends).contains("**Top pick:** High (formal)"));
    }

    #[test]
    fn predictions_without_trends_are_a_fixed_sentence() {
        assert!(trend_predictions(&[]).starts_with("Not enough current trend data"));
        let text = trend_predictions(&[trend("a", Category::Vintage, 0.5, 20.0)]);
        assert!(text.contains("1 current trends averaging 20.0% growth"));
        assert!(text.contains("vintage leading"));
    }
}
