// ABOUTME: Plan and image service shared by the HTTP routes and the CLI
// ABOUTME: Profile -> prompt -> model -> recovery -> validation, plus cached image lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::constants::gemini::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};
use crate::errors::{AppError, AppResult};
use crate::images::{
    GeminiImageProvider, ImageCache, ImageCategory, ImageFallbackChain, ImageOutcome,
    ImageProvider, ImageReference,
};
use crate::llm::{build_plan_prompt, ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
use crate::logging::AppLogger;
use crate::models::{FitnessPlan, UserProfile};
use crate::plan::PlanCandidate;

/// Sampling settings sent with every plan request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Model override; the provider default is used when `None`
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token ceiling
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Plan generation and image acquisition
pub struct FitnessPlanService {
    provider: Option<Arc<dyn LlmProvider>>,
    generation: GenerationSettings,
    images: ImageFallbackChain,
    image_cache: ImageCache,
}

impl FitnessPlanService {
    /// Create a service; `None` means no text provider credential is configured
    #[must_use]
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, images: ImageFallbackChain) -> Self {
        Self {
            provider,
            generation: GenerationSettings::default(),
            images,
            image_cache: ImageCache::new(),
        }
    }

    /// Override the sampling settings
    #[must_use]
    pub fn with_generation(mut self, generation: GenerationSettings) -> Self {
        self.generation = generation;
        self
    }

    /// Build the production service from configuration
    ///
    /// Missing credentials are not an error here: plan generation reports
    /// them when called, and images go straight to the fallback provider.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.http.timeout())
            .build()
            .map_err(|e| {
                AppError::config(format!("Failed to build HTTP client: {e}")).with_source(e)
            })?;
        let gemini = &config.gemini;

        let provider = gemini.api_key.as_ref().map(|key| {
            Arc::new(
                GeminiProvider::new(key.clone())
                    .with_base_url(gemini.base_url.clone())
                    .with_default_model(gemini.text_model.clone())
                    .with_client(client.clone()),
            ) as Arc<dyn LlmProvider>
        });
        if provider.is_none() {
            warn!("GEMINI_API_KEY not configured, plan generation is unavailable");
        }

        let image_provider = gemini.image_credential().map(|key| {
            Arc::new(
                GeminiImageProvider::new(key)
                    .with_base_url(gemini.base_url.clone())
                    .with_model(gemini.image_model.clone())
                    .with_client(client.clone()),
            ) as Arc<dyn ImageProvider>
        });

        Ok(
            Self::new(provider, ImageFallbackChain::new(image_provider, config.images.clone()))
                .with_generation(GenerationSettings {
                    model: None,
                    temperature: gemini.temperature,
                    max_output_tokens: gemini.max_output_tokens,
                }),
        )
    }

    /// Whether a primary image provider is configured
    #[must_use]
    pub fn has_primary_images(&self) -> bool {
        self.images.has_primary()
    }

    /// Whether plan generation has a text provider
    #[must_use]
    pub fn can_generate_plans(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate a validated plan for a profile
    ///
    /// No retry is attempted; callers decide whether to ask again.
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` when the profile is incomplete
    /// - `ConfigMissing` when no text provider credential is configured
    /// - upstream errors from the provider (transport, status, quota, empty output)
    /// - `PlanSchemaViolation` when no usable plan could be recovered
    #[instrument(skip(self, profile), fields(goal = %profile.fitness_goal))]
    pub async fn generate_plan(&self, profile: &UserProfile) -> AppResult<FitnessPlan> {
        profile.validate()?;
        let provider = self.provider.as_ref().ok_or_else(|| {
            AppError::config_missing("GEMINI_API_KEY is not configured; cannot generate a plan")
        })?;

        let started = Instant::now();
        info!(
            provider = provider.display_name(),
            model = self
                .generation
                .model
                .as_deref()
                .unwrap_or_else(|| provider.default_model()),
            "Generating fitness plan"
        );

        let mut request = ChatRequest::new(vec![ChatMessage::user(build_plan_prompt(profile))])
            .with_temperature(self.generation.temperature)
            .with_max_tokens(self.generation.max_output_tokens);
        if let Some(model) = &self.generation.model {
            request = request.with_model(model.clone());
        }

        let response = provider.complete(&request).await?;
        debug!(
            chars = response.content.len(),
            finish_reason = ?response.finish_reason,
            "Model output received"
        );

        let candidate = PlanCandidate::RawText(response.content).recover();
        if let PlanCandidate::Parsed(recovered) = &candidate {
            info!(stage = ?recovered.stage(), "Model output recovered");
        }
        let plan = candidate.validate().map_err(|e| {
            warn!(error = %e, "Recovered model output failed validation");
            e
        })?;

        let exercise_count = plan
            .daily_routines()
            .iter()
            .map(|routine| routine.exercises.len())
            .sum();
        AppLogger::log_plan_generated(
            plan.daily_routines().len(),
            exercise_count,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(plan)
    }

    /// Resolve an image for an exercise or meal, with the fallback note
    ///
    /// Blank names are unavailable (`None`). Resolved outcomes are cached by
    /// category and name, and the first stored outcome wins, so repeated
    /// lookups never reach the primary provider again.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn resolve_image(
        &self,
        name: &str,
        category: ImageCategory,
    ) -> Option<ImageOutcome> {
        if name.trim().is_empty() {
            debug!("Blank image subject, reporting unavailable");
            return None;
        }
        if let Some(cached) = self.image_cache.get(category, name) {
            AppLogger::log_image_resolved(category, cached.source, true);
            return Some(cached);
        }

        let outcome = self.images.resolve(name, category).await;
        AppLogger::log_image_resolved(category, outcome.source, false);
        Some(self.image_cache.insert(category, name, outcome))
    }

    /// Image for an exercise or meal; `None` means unavailable
    pub async fn generate_image(
        &self,
        name: &str,
        category: ImageCategory,
    ) -> Option<ImageReference> {
        self.resolve_image(name, category)
            .await
            .map(|outcome| outcome.reference)
    }

    /// Image for an exercise
    pub async fn exercise_image(&self, name: &str) -> Option<ImageReference> {
        self.generate_image(name, ImageCategory::Exercise).await
    }

    /// Image for a meal or snack
    pub async fn food_image(&self, name: &str) -> Option<ImageReference> {
        self.generate_image(name, ImageCategory::Food).await
    }

    /// Number of cached image outcomes
    #[must_use]
    pub fn cached_images(&self) -> usize {
        self.image_cache.len()
    }
}

impl std::fmt::Debug for FitnessPlanService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitnessPlanService")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("generation", &self.generation)
            .field("images", &self.images)
            .field("cached_images", &self.image_cache.len())
            .finish()
    }
}
