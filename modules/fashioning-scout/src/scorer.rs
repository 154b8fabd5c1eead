use chrono::{DateTime, Duration, Utc};

/// Growth estimate for a fragment with no tags.
pub const BASE_GROWTH_RATE: f64 = 10.0;

const MENTIONS_CAP: f64 = 10_000.0;
const INFLUENCERS_CAP: f64 = 100.0;
const BRANDS_CAP: f64 = 20.0;

/// Weighted engagement score in [0, 1], rounded to two decimals.
/// Each signal saturates at its own cap before weighting.
pub fn trend_score(social_mentions: u64, influencer_count: u64, brand_count: u64) -> f64 {
    let mentions = (social_mentions as f64 / MENTIONS_CAP).min(1.0);
    let influencers = (influencer_count as f64 / INFLUENCERS_CAP).min(1.0);
    let brands = (brand_count as f64 / BRANDS_CAP).min(1.0);
    round_to(0.4 * mentions + 0.3 * influencers + 0.3 * brands, 2).clamp(0.0, 1.0)
}

/// Percentage growth estimate. Unbounded above.
pub fn growth_rate(tag_count: usize) -> f64 {
    round_to(BASE_GROWTH_RATE + 2.0 * tag_count as f64, 1)
}

/// Expected peak: base growth peaks in 90 days, faster growth sooner,
/// never closer than two weeks out.
pub fn predicted_peak(now: DateTime<Utc>, growth_rate: f64) -> DateTime<Utc> {
    let days = (180.0 / (1.0 + growth_rate.max(0.0) / 10.0)).round() as i64;
    now + Duration::days(days.max(14))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
