// ABOUTME: Image fallback chain settings: prompt phrasing, placeholders and fallback endpoint
// ABOUTME: Defaults come from constants; tests and deployments substitute their own
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::images;
use crate::images::ImageCategory;

/// Placeholder in prompt templates replaced by the exercise or meal name
pub const SUBJECT_PLACEHOLDER: &str = "{subject}";

/// Settings consumed by [`crate::images::ImageFallbackChain`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageChainConfig {
    /// Prompt template for exercise images, containing `{subject}`
    pub exercise_template: String,
    /// Prompt template for food images, containing `{subject}`
    pub food_template: String,
    /// Prompt used for exercise fallbacks after an unexpected failure
    pub exercise_placeholder: String,
    /// Prompt used for food fallbacks after an unexpected failure
    pub food_placeholder: String,
    /// Fallback provider endpoint; the sanitized prompt becomes a path segment
    pub fallback_base_url: String,
}

impl Default for ImageChainConfig {
    fn default() -> Self {
        Self {
            exercise_template: images::EXERCISE_PROMPT_TEMPLATE.to_owned(),
            food_template: images::FOOD_PROMPT_TEMPLATE.to_owned(),
            exercise_placeholder: images::EXERCISE_PLACEHOLDER_PROMPT.to_owned(),
            food_placeholder: images::FOOD_PLACEHOLDER_PROMPT.to_owned(),
            fallback_base_url: images::FALLBACK_BASE_URL.to_owned(),
        }
    }
}

impl ImageChainConfig {
    /// Override the fallback endpoint
    #[must_use]
    pub fn with_fallback_base_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_base_url = url.into();
        self
    }

    /// Compose the category-specific descriptive prompt for a subject
    #[must_use]
    pub fn describe(&self, category: ImageCategory, subject: &str) -> String {
        let template = match category {
            ImageCategory::Exercise => &self.exercise_template,
            ImageCategory::Food => &self.food_template,
        };
        template.replace(SUBJECT_PLACEHOLDER, subject.trim())
    }

    /// Generic prompt for a category
    #[must_use]
    pub fn placeholder(&self, category: ImageCategory) -> &str {
        match category {
            ImageCategory::Exercise => &self.exercise_placeholder,
            ImageCategory::Food => &self.food_placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_uses_category_phrasing() {
        let config = ImageChainConfig::default();
        assert_eq!(
            config.describe(ImageCategory::Exercise, " Goblet Squat "),
            "realistic professional fitness photo of Goblet Squat, clear exercise form, gym setting, high quality fitness photography"
        );
        assert!(config
            .describe(ImageCategory::Food, "Oatmeal")
            .starts_with("professional food photography of Oatmeal,"));
    }

    #[test]
    fn test_placeholders_differ_per_category() {
        let config = ImageChainConfig::default();
        assert_ne!(
            config.placeholder(ImageCategory::Exercise),
            config.placeholder(ImageCategory::Food)
        );
    }
}
