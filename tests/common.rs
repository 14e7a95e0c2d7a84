// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides logging setup, profile fixtures and scripted text and image providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `fitplan_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use fitplan_server::{
    config::ImageChainConfig,
    errors::{AppError, AppResult},
    images::{ImageFallbackChain, ImageProvider, ImageProviderError, InlineImage},
    llm::{ChatRequest, ChatResponse, LlmProvider},
    models::UserProfile,
    services::FitnessPlanService,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Complete profile used across tests
pub fn sample_profile() -> UserProfile {
    UserProfile {
        name: "Alex".to_owned(),
        age: "29".to_owned(),
        gender: "female".to_owned(),
        height: "168".to_owned(),
        weight: "61".to_owned(),
        fitness_goal: "muscle_gain".to_owned(),
        fitness_level: "intermediate".to_owned(),
        workout_location: "gym".to_owned(),
        dietary_preferences: "vegetarian".to_owned(),
        medical_history: None,
        stress_level: Some("moderate".to_owned()),
    }
}

/// Well-formed three day plan as the model would return it
pub const BARE_PLAN: &str = r#"{
  "workout": {
    "dailyRoutines": [
      {
        "day": "Day 1 - Push",
        "exercises": [
          {"name": "Bench Press", "sets": "4", "reps": "8-10", "rest": "90s", "description": "Flat barbell press."},
          {"name": "Overhead Press", "sets": "3", "reps": "8", "rest": "90s", "description": "Standing strict press."},
          {"name": "Dips", "sets": "3", "reps": "10", "rest": "60s", "description": "Lean forward for chest."}
        ]
      },
      {
        "day": "Day 2 - Pull",
        "exercises": [
          {"name": "Deadlift", "sets": "3", "reps": "5", "rest": "120s", "description": "Neutral spine, hinge."},
          {"name": "Pull-up", "sets": "4", "reps": "6-8", "rest": "90s", "description": "Full hang each rep."}
        ]
      },
      {
        "day": "Day 3 - Legs",
        "exercises": [
          {"name": "Back Squat", "sets": "4", "reps": "6-8", "rest": "120s", "description": "Hip crease below knee."},
          {"name": "Romanian Deadlift", "sets": "3", "reps": "10", "rest": "90s", "description": "Soft knees."},
          {"name": "Walking Lunge", "sets": "3", "reps": "12", "rest": "60s", "description": "Long strides."},
          {"name": "Calf Raise", "sets": "4", "reps": "15", "rest": "45s", "description": "Pause at the top."}
        ]
      }
    ]
  },
  "diet": {
    "meals": {
      "breakfast": "Greek yogurt with oats and berries",
      "lunch": "Lentil bowl with quinoa",
      "dinner": "Tofu stir fry with brown rice",
      "snacks": "Almonds, protein shake"
    }
  },
  "tips": ["Sleep 8 hours", "Add weight weekly", "Eat protein every meal"],
  "motivation": "Strong today, stronger tomorrow."
}"#;

/// [`BARE_PLAN`] wrapped in a markdown fence
pub fn fenced_plan() -> String {
    format!("```json\n{BARE_PLAN}\n```")
}

// ============================================================================
// Scripted text provider
// ============================================================================

/// Text provider returning a fixed reply, counting calls and keeping the last prompt
pub struct ScriptedLlm {
    reply: AppResult<String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedLlm {
    /// Provider that always answers with `content`
    pub fn replying(content: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(content.into()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    /// Provider that always fails with a clone of `error`'s code and message
    pub fn failing(error: AppError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    /// Number of completions requested so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text of the last message sent to the provider
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = request.messages.last().map(|m| m.content.clone());
        match &self.reply {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("STOP".to_owned()),
            }),
            Err(e) => Err(AppError::new(e.code, e.message.clone())),
        }
    }
}

// ============================================================================
// Scripted image provider
// ============================================================================

/// Image provider returning a fixed inline image, counting calls
pub struct InlineImageProvider {
    calls: AtomicUsize,
}

impl InlineImageProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProvider for InlineImageProvider {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn display_name(&self) -> &'static str {
        "Inline"
    }

    async fn generate(&self, _prompt: &str) -> Result<InlineImage, ImageProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(InlineImage {
            mime_type: "image/png".to_owned(),
            data: "aGVsbG8=".to_owned(),
        })
    }
}

/// Service with an optional text provider and no primary image provider
pub fn service_with(provider: Option<Arc<dyn LlmProvider>>) -> FitnessPlanService {
    init_test_logging();
    FitnessPlanService::new(
        provider,
        ImageFallbackChain::new(None, ImageChainConfig::default()),
    )
}

/// Service with no text provider and `primary` as the image provider
pub fn service_with_images(primary: Arc<dyn ImageProvider>) -> FitnessPlanService {
    init_test_logging();
    FitnessPlanService::new(
        None,
        ImageFallbackChain::new(Some(primary), ImageChainConfig::default()),
    )
}
