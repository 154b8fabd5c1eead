pub mod advisor;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod insight;
pub mod intent;
pub mod prefs;
pub mod prompts;
pub mod templates;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use advisor::{Advice, ChatReply, ComprehensiveAnalysis, FashionAdvisor, TrendAnalysis};
pub use error::AssistantError;
pub use gemini::GeminiClient;
pub use generator::{TextGenerator, Unconfigured};
pub use insight::{ComprehensiveScore, Confidence, TrendInsight};
pub use intent::{classify_intent, ChatIntent};
pub use prefs::UserPreferences;
