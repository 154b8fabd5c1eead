//! Test doubles for the assistant.
//!
//! `ScriptedGenerator` stands in for the model: it either answers every
//! prompt with a fixed reply or fails every call, and records the prompts
//! it was given.

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use fashioning_common::{Category, Demographics, Region, Trend};

use crate::error::{AssistantError, Result};
use crate::generator::TextGenerator;

// ---------------------------------------------------------------------------
// ScriptedGenerator
// ---------------------------------------------------------------------------

pub struct ScriptedGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| AssistantError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn trend(name: &str, category: Category, score: f64, growth: f64) -> Trend {
    let now = Utc::now();
    Trend {
        id: name.to_lowercase().replace(' ', "_"),
        name: name.to_string(),
        description: format!("{name} is everywhere this season."),
        category,
        regions: BTreeSet::from([Region::Global]),
        source: "Test".to_string(),
        source_url: None,
        image_url: None,
        brand: None,
        trend_score: score,
        growth_rate: growth,
        sustainability_score: 0.5,
        color_palette: vec!["#000000".into(), "#FFFFFF".into()],
        demographics: Demographics::default(),
        social_mentions: 0,
        influencer_adoptions: 0,
        brand_adoptions: Vec::new(),
        tags: Vec::new(),
        predicted_peak: now + Duration::days(30),
        created_at: now,
        updated_at: now,
    }
}
