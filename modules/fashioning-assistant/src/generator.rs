use async_trait::async_trait;

use crate::error::{AssistantError, Result};

// --- TextGenerator trait ---

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
    fn name(&self) -> &str;
}

/// Stand-in used when no API key is configured. Always unavailable.
pub struct Unconfigured;

#[async_trait]
impl TextGenerator for Unconfigured {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(AssistantError::Unavailable(
            "no generative model configured".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "unconfigured"
    }
}
