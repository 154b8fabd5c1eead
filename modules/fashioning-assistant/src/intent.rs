use serde::{Deserialize, Serialize};

/// What a free-form chat message is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatIntent {
    TrendAnalysis,
    StyleAdvice,
    TrendPrediction,
    General,
}

impl ChatIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatIntent::TrendAnalysis => "trend_analysis",
            ChatIntent::StyleAdvice => "style_advice",
            ChatIntent::TrendPrediction => "trend_prediction",
            ChatIntent::General => "general",
        }
    }
}

const ANALYSIS_CUES: &[&str] = &["analyze", "analysis", "insights", "about this trend"];
const STYLE_CUES: &[&str] = &["recommend", "style", "what should i wear", "outfit"];
const PREDICTION_CUES: &[&str] = &["predict", "future", "next", "coming", "will be"];

/// Keyword dispatch, checked in order: analysis, style, prediction.
pub fn classify_intent(message: &str) -> ChatIntent {
    let lower = message.to_lowercase();
    let mentions = |cues: &[&str]| cues.iter().any(|c| lower.contains(c));

    if mentions(ANALYSIS_CUES) {
        ChatIntent::TrendAnalysis
    } else if mentions(STYLE_CUES) {
        ChatIntent::StyleAdvice
    } else if mentions(PREDICTION_CUES) {
        ChatIntent::TrendPrediction
    } else {
        ChatIntent::General
    }
}
