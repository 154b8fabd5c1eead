use std::collections::BTreeMap;

use serde::Serialize;

use fashioning_common::Trend;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceSummary {
    pub count: u64,
    pub avg_trend_score: f64,
    pub avg_growth_rate: f64,
}

/// Per-source quality figures and taxonomy tallies over a sample of the
/// current trends. `total_trends` is the index total, `analyzed` the
/// sample size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichmentAnalytics {
    pub total_trends: u64,
    pub analyzed: usize,
    pub source_analysis: BTreeMap<String, SourceSummary>,
    pub category_analysis: BTreeMap<String, u64>,
    pub region_analysis: BTreeMap<String, u64>,
}

impl EnrichmentAnalytics {
    pub fn from_trends(total_trends: u64, trends: &[Trend]) -> Self {
        let mut analytics = Self {
            total_trends,
            analyzed: trends.len(),
            ..Default::default()
        };

        for trend in trends {
            let source = analytics
                .source_analysis
                .entry(trend.source.clone())
                .or_default();
            source.count += 1;
            source.avg_trend_score += trend.trend_score;
            source.avg_growth_rate += trend.growth_rate;

            *analytics
                .category_analysis
                .entry(trend.category.to_string())
                .or_default() += 1;
            for region in &trend.regions {
                *analytics
                    .region_analysis
                    .entry(region.to_string())
                    .or_default() += 1;
            }
        }

        for source in analytics.source_analysis.values_mut() {
            let n = source.count as f64;
            source.avg_trend_score /= n;
            source.avg_growth_rate /= n;
        }
        analytics
    }
}

/// Index-wide counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedStats {
    pub trends_total: u64,
    pub categories: usize,
    pub regions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticDataset;

    #[test]
    fn averages_are_per_source() {
        let data = SyntheticDataset::sample();
        let mut trends: Vec<Trend> = ["trend_001", "trend_002", "trend_003"]
            .iter()
            .filter_map(|id| data.get(id))
            .collect();
        trends[0].source = "Vogue".into();
        trends[1].source = "Vogue".into();
        trends[2].source = "Instagram".into();
        let expected_score = (trends[0].trend_score + trends[1].trend_score) / 2.0;

        let analytics = EnrichmentAnalytics::from_trends(3, &trends);

        assert_eq!(analytics.analyzed, 3);
        assert_eq!(analytics.source_analysis["Vogue"].count, 2);
        assert!((analytics.source_analysis["Vogue"].avg_trend_score - expected_score).abs() < 1e-9);
        assert_eq!(analytics.source_analysis["Instagram"].count, 1);
        assert_eq!(analytics.category_analysis["streetwear"], 1);
        assert_eq!(analytics.region_analysis["North America"], 2);
    }

    #[test]
    fn empty_sample_has_no_sources() {
        let analytics = EnrichmentAnalytics::from_trends(0, &[]);
        assert!(analytics.source_analysis.is_empty());
        assert!(analytics.region_analysis.is_empty());
    }
}
