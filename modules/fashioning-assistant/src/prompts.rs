//! Prompt text sent to the generative model.

use std::fmt::Write;

use fashioning_common::{Category, Trend};

use crate::prefs::UserPreferences;

const ADVISOR_PERSONA: &str =
    "You are a senior fashion trend analyst advising retailers and shoppers.";

pub(crate) fn join_or(items: impl IntoIterator<Item = impl AsRef<str>>, empty: &str) -> String {
    let joined = items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        empty.to_string()
    } else {
        joined
    }
}

pub(crate) fn regions_of(trend: &Trend) -> String {
    join_or(trend.regions.iter().map(|r| r.as_str()), "Global")
}

/// One bullet per trend, highest score first, at most `limit`.
pub(crate) fn top_trend_lines(trends: &[Trend], limit: usize) -> String {
    let mut ranked: Vec<&Trend> = trends.iter().collect();
    ranked.sort_by(|a, b| b.trend_score.total_cmp(&a.trend_score));

    let mut out = String::new();
    for t in ranked.into_iter().take(limit) {
        let _ = writeln!(out, "- {} ({}) - Score: {:.2}", t.name, t.category, t.trend_score);
    }
    out
}

pub(crate) fn average_growth(trends: &[Trend]) -> f64 {
    if trends.is_empty() {
        return 0.0;
    }
    trends.iter().map(|t| t.growth_rate).sum::<f64>() / trends.len() as f64
}

/// Most frequent category; ties go to the category listed first.
pub(crate) fn dominant_category(trends: &[Trend]) -> Option<Category> {
    Category::ALL
        .iter()
        .map(|c| (*c, trends.iter().filter(|t| t.category == *c).count()))
        .filter(|(_, n)| *n > 0)
        .fold(None, |best: Option<(Category, usize)>, (c, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((c, n)),
        })
        .map(|(c, _)| c)
}

pub fn trend_analysis(trend: &Trend) -> String {
    let gender = join_or(
        trend
            .demographics
            .gender_split
            .iter()
            .map(|(k, v)| format!("{k} {v}%")),
        "unknown",
    );

    format!(
        "{ADVISOR_PERSONA}\n\n\
         Analyze this fashion trend and give actionable insights.\n\n\
         Trend: {name}\n\
         Category: {category}\n\
         Description: {description}\n\
         Trend score: {score:.2}\n\
         Growth rate: {growth}%\n\
         Audience: primary {primary}, secondary {secondary}; {gender}\n\
         Regions: {regions}\n\
         Color palette: {palette}\n\
         Sustainability score: {sustainability:.2}\n\
         Adopting brands: {brands}\n\
         Tags: {tags}\n\n\
         Cover: why it is resonating now, who is wearing it, how long it will last, \
         styling tips, and how a retailer should stock it.",
        name = trend.name,
        category = trend.category,
        description = trend.description,
        score = trend.trend_score,
        growth = trend.growth_rate,
        primary = trend.demographics.primary_age,
        secondary = trend.demographics.secondary_age,
        regions = regions_of(trend),
        palette = join_or(&trend.color_palette, "unspecified"),
        sustainability = trend.sustainability_score,
        brands = join_or(&trend.brand_adoptions, "none recorded"),
        tags = join_or(&trend.tags, "none"),
    )
}

pub fn style_recommendations(prefs: &UserPreferences, trends: &[Trend]) -> String {
    format!(
        "{ADVISOR_PERSONA}\n\n\
         Give personal style recommendations.\n\n\
         Preferred categories: {categories}\n\
         Preferred regions: {regions}\n\
         Style preferences: {styles}\n\n\
         Current top trends:\n{top}\n\
         Suggest three outfits built around these trends, with key pieces and \
         colors, and explain how each suits the stated preferences.",
        categories = join_or(&prefs.preferred_categories, "any"),
        regions = join_or(&prefs.preferred_regions, "any"),
        styles = join_or(&prefs.style_preferences, "open to anything"),
        top = top_trend_lines(trends, 5),
    )
}

pub fn trend_predictions(trends: &[Trend]) -> String {
    let dominant = dominant_category(trends)
        .map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string());

    format!(
        "{ADVISOR_PERSONA}\n\n\
         Predict where fashion is heading over the next 6 to 12 months.\n\n\
         Trends analyzed: {count}\n\
         Average growth rate: {growth:.1}%\n\
         Dominant category: {dominant}\n\
         Top trending:\n{top}\n\
         Name the emerging directions, what is likely to fade, and the signals \
         a buyer should watch.",
        count = trends.len(),
        growth = average_growth(trends),
        top = top_trend_lines(trends, 5),
    )
}

/// Question about one specific trend.
pub fn trend_question(message: &str, trend: &Trend) -> String {
    format!(
        "{ADVISOR_PERSONA}\n\n\
         The user is looking at the trend \"{name}\" ({category}, score {score:.2}, \
         growing {growth}%): {description}\n\n\
         User question: {message}\n\n\
         Answer concisely and specifically about this trend.",
        name = trend.name,
        category = trend.category,
        score = trend.trend_score,
        growth = trend.growth_rate,
        description = trend.description,
    )
}

pub fn general_chat(message: &str, trends: &[Trend]) -> String {
    let context = if trends.is_empty() {
        String::new()
    } else {
        format!("Current top trends:\n{}\n", top_trend_lines(trends, 5))
    };

    format!(
        "{ADVISOR_PERSONA}\n\n{context}\
         User: {message}\n\n\
         Reply helpfully and briefly. Stay on fashion, style, and trends."
    )
}
