use serde::{Deserialize, Serialize};

/// Shopper preferences supplied with a style request. All optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub preferred_categories: Vec<String>,
    pub preferred_regions: Vec<String>,
    pub style_preferences: Vec<String>,
}

impl UserPreferences {
    pub fn is_empty(&self) -> bool {
        self.preferred_categories.is_empty()
            && self.preferred_regions.is_empty()
            && self.style_preferences.is_empty()
    }
}
