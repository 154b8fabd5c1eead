use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use fashioning_common::Trend;

use crate::generator::{TextGenerator, Unconfigured};
use crate::insight::{ComprehensiveScore, TrendInsight};
use crate::intent::{classify_intent, ChatIntent};
use crate::prefs::UserPreferences;
use crate::{prompts, templates};

/// Text produced for a request, and whether it came from the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub text: String,
    pub generated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendAnalysis {
    pub trend_id: String,
    pub analysis: String,
    pub generated: bool,
    pub score: ComprehensiveScore,
}

/// Structured insight, generated or template analysis, and the blended score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensiveAnalysis {
    pub trend_id: String,
    pub insight: TrendInsight,
    pub analysis: String,
    pub generated: bool,
    pub score: ComprehensiveScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub intent: ChatIntent,
    pub generated: bool,
}

/// Fashion Q&A over a [`TextGenerator`]. Every operation answers: when the
/// generator fails the reply comes from a template instead.
pub struct FashionAdvisor {
    generator: Arc<dyn TextGenerator>,
}

impl FashionAdvisor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Template replies only.
    pub fn unconfigured() -> Self {
        Self::new(Arc::new(Unconfigured))
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    pub async fn analyze_trend(&self, trend: &Trend) -> TrendAnalysis {
        let advice = self
            .ask(
                "analyze_trend",
                prompts::trend_analysis(trend),
                || templates::trend_analysis(trend),
            )
            .await;

        TrendAnalysis {
            trend_id: trend.id.clone(),
            score: ComprehensiveScore::compute(trend, advice.generated),
            analysis: advice.text,
            generated: advice.generated,
        }
    }

    pub async fn comprehensive_analysis(&self, trend: &Trend) -> ComprehensiveAnalysis {
        let analysis = self.analyze_trend(trend).await;
        ComprehensiveAnalysis {
            trend_id: analysis.trend_id,
            insight: TrendInsight::from_trend(trend),
            analysis: analysis.analysis,
            generated: analysis.generated,
            score: analysis.score,
        }
    }

    pub async fn style_recommendations(
        &self,
        prefs: &UserPreferences,
        trends: &[Trend],
    ) -> Advice {
        self.ask(
            "style_recommendations",
            prompts::style_recommendations(prefs, trends),
            || templates::style_recommendations(trends),
        )
        .await
    }

    pub async fn predict(&self, trends: &[Trend]) -> Advice {
        self.ask(
            "predict",
            prompts::trend_predictions(trends),
            || templates::trend_predictions(trends),
        )
        .await
    }

    /// Free-form chat. `focus` is the trend the user is looking at, if any;
    /// `trends` is the current top-trend context.
    pub async fn chat(&self, message: &str, focus: Option<&Trend>, trends: &[Trend]) -> ChatReply {
        let intent = classify_intent(message);
        info!(intent = intent.as_str(), "Chat message received");

        if let Some(trend) = focus {
            if message.to_lowercase().contains("trend") {
                let advice = self
                    .ask(
                        "chat_trend",
                        prompts::trend_question(message, trend),
                        || templates::trend_analysis(trend),
                    )
                    .await;
                return ChatReply {
                    response: advice.text,
                    intent: ChatIntent::TrendAnalysis,
                    generated: advice.generated,
                };
            }
        }

        let advice = match intent {
            ChatIntent::TrendAnalysis => match focus.or_else(|| trends.first()) {
                Some(trend) => {
                    let analysis = self.analyze_trend(trend).await;
                    Advice {
                        text: analysis.analysis,
                        generated: analysis.generated,
                    }
                }
                None => self.general(message, trends).await,
            },
            ChatIntent::StyleAdvice => {
                self.style_recommendations(&UserPreferences::default(), trends)
                    .await
            }
            ChatIntent::TrendPrediction => self.predict(trends).await,
            ChatIntent::General => self.general(message, trends).await,
        };

        ChatReply {
            response: advice.text,
            intent,
            generated: advice.generated,
        }
    }

    async fn general(&self, message: &str, trends: &[Trend]) -> Advice {
        self.ask("chat", prompts::general_chat(message, trends), templates::general)
            .await
    }

    async fn ask(&self, operation: &'static str, prompt: String, fallback: impl FnOnce() -> String) -> Advice {
        match self.generator.generate(&prompt).await {
            Ok(text) => Advice {
                text,
                generated: true,
            },
            Err(e) => {
                warn!(
                    operation,
                    generator = self.generator.name(),
                    error = %e,
                    "Generator unavailable, using template reply"
                );
                Advice {
                    text: fallback(),
                    generated: false,
                }
            }
        }
    }
}
