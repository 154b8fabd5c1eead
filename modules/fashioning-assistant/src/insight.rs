use serde::Serialize;

use fashioning_common::Trend;

use crate::prompts::regions_of;

/// Quick numeric read of a single trend, served by the trend analysis route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendInsight {
    pub trend_id: String,
    pub popularity_score: f64,
    pub growth_prediction: String,
    pub market_opportunity: String,
    pub competitor_analysis: Vec<String>,
    pub recommendations: Vec<String>,
}

impl TrendInsight {
    pub fn from_trend(trend: &Trend) -> Self {
        let opportunity = if trend.trend_score > 0.8 { "High" } else { "Medium" };
        Self {
            trend_id: trend.id.clone(),
            popularity_score: trend.trend_score * 100.0,
            growth_prediction: format!("Trend is growing at {}%", trend.growth_rate),
            market_opportunity: opportunity.to_string(),
            competitor_analysis: trend.brand_adoptions.clone(),
            recommendations: vec![
                format!(
                    "Target the {} age group.",
                    trend.demographics.primary_age
                ),
                format!("Focus marketing efforts in: {}.", regions_of(trend)),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Blended 0-100 score. Popularity contributes up to 55 points, growth up
/// to 20, sustainability up to 15, and a generated analysis 10.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensiveScore {
    pub overall: f64,
    pub popularity: f64,
    pub growth_bonus: f64,
    pub sustainability_bonus: f64,
    pub analysis_bonus: f64,
    pub confidence: Confidence,
}

impl ComprehensiveScore {
    pub fn compute(trend: &Trend, analysis_generated: bool) -> Self {
        let popularity = trend.trend_score.clamp(0.0, 1.0) * 55.0;
        let growth_bonus = (trend.growth_rate.max(0.0) * 2.0).min(20.0);
        let sustainability_bonus = (trend.sustainability_score.clamp(0.0, 1.0) * 100.0 * 0.5).min(15.0);
        let analysis_bonus = if analysis_generated { 10.0 } else { 0.0 };

        let raw = popularity + growth_bonus + sustainability_bonus + analysis_bonus;
        let overall = (raw.min(100.0) * 10.0).round() / 10.0;

        let confidence = if overall > 80.0 {
            Confidence::High
        } else if overall > 60.0 {
            Confidence::Medium
        } else {
            Confidence::Low
        };

        Self {
            overall,
            popularity,
            growth_bonus,
            sustainability_bonus,
            analysis_bonus,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::trend;
    use fashioning_common::Category;

    #[test]
    fn insight_scales_popularity_and_names_the_audience() {
        let mut t = trend("Quiet Luxury", Category::Luxury, 0.92, 45.2);
        t.brand_adoptions = vec!["The Row".into()];
        let insight = TrendInsight::from_trend(&t);

        assert!((insight.popularity_score - 92.0).abs() < 1e-9);
        assert_eq!(insight.market_opportunity, "High");
        assert_eq!(insight.growth_prediction, "Trend is growing at 45.2%");
        assert_eq!(insight.competitor_analysis, vec!["The Row".to_string()]);
        assert_eq!(insight.recommendations[0], "Target the 18-35 age group.");
        assert_eq!(insight.recommendations[1], "Focus marketing efforts in: Global.");
    }

    #[test]
    fn threshold_score_is_medium_opportunity() {
        let insight = TrendInsight::from_trend(&trend("x", Category::Casual, 0.8, 0.0));
        assert_eq!(insight.market_opportunity, "Medium");
    }

    #[test]
    fn score_is_capped_at_100() {
        let mut t = trend("x", Category::Luxury, 1.0, 90.0);
        t.sustainability_score = 1.0;
        let score = ComprehensiveScore::compute(&t, true);
        assert_eq!(score.overall, 100.0);
        assert_eq!(score.confidence, Confidence::High);
    }

    #[test]
    fn weak_trend_has_low_confidence() {
        let mut t = trend("x", Category::Casual, 0.1, 2.0);
        t.sustainability_score = 0.2;
        let score = ComprehensiveScore::compute(&t, false);
        // 5.5 + 4 + 10
        assert_eq!(score.overall, 19.5);
        assert_eq!(score.confidence, Confidence::Low);
    }
}
