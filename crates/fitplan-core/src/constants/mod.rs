// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Prompt ceilings, plan defaults, provider endpoints and storage keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large file. Values that deployments may want to change (models, endpoints,
//! image phrasing) are only defaults here; the configuration layer can
//! override them.

/// Output ceilings communicated to the text model in the plan prompt
pub mod prompt_limits {
    /// Maximum response size in characters
    pub const MAX_RESPONSE_CHARS: usize = 4000;
    /// Maximum number of entries in `dailyRoutines`
    pub const MAX_ROUTINE_DAYS: usize = 3;
    /// Maximum number of exercises per day
    pub const MAX_EXERCISES_PER_DAY: usize = 4;
    /// Maximum words per exercise description
    pub const MAX_DESCRIPTION_WORDS: usize = 15;
}

/// Fallback values used while recovering and normalizing plans
pub mod plan_defaults {
    /// Motivation used when a strictly parsed plan carries none
    pub const STRICT_MOTIVATION: &str = "Stay consistent – progress compounds.";
    /// Motivation used when piecewise recovery finds no motivation line
    pub const RECOVERED_MOTIVATION: &str =
        "You’re doing great. Stay consistent and trust the process.";
    /// Motivation used by the validator when the candidate's is absent or empty
    pub const VALIDATED_MOTIVATION: &str = "You’ve got this. One workout at a time.";
    /// Placeholder for optional profile fields left blank (medical history)
    pub const NO_MEDICAL_HISTORY: &str = "None";
    /// Placeholder for optional profile fields left blank (stress level)
    pub const STRESS_NOT_SPECIFIED: &str = "Not specified";
}

/// Gemini generative language API defaults
pub mod gemini {
    /// Base URL for the Gemini API
    pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Default text model used for plan generation
    pub const DEFAULT_TEXT_MODEL: &str = "gemini-flash-latest";
    /// Default image model used for exercise and meal pictures
    pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
    /// Default sampling temperature for plan generation
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    /// Default output token ceiling for plan generation
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;
    /// HTTP status Gemini returns for retired models
    pub const MODEL_RETIRED_STATUS: u16 = 410;
}

/// Image prompt phrasing and the authentication-free fallback provider
pub mod images {
    /// Fallback provider endpoint; the sanitized prompt is appended as a path segment
    pub const FALLBACK_BASE_URL: &str = "https://image.pollinations.ai/prompt";
    /// Template for exercise imagery, `{subject}` is replaced with the exercise name
    pub const EXERCISE_PROMPT_TEMPLATE: &str = "realistic professional fitness photo of {subject}, clear exercise form, gym setting, high quality fitness photography";
    /// Template for food imagery, `{subject}` is replaced with the meal description
    pub const FOOD_PROMPT_TEMPLATE: &str = "professional food photography of {subject}, healthy meal, appetizing, clean eating, natural lighting, high resolution";
    /// Placeholder prompt for exercise imagery after an unexpected failure
    pub const EXERCISE_PLACEHOLDER_PROMPT: &str = "generic fitness exercise image";
    /// Placeholder prompt for food imagery after an unexpected failure
    pub const FOOD_PLACEHOLDER_PROMPT: &str = "generic healthy food image";
    /// Media type assumed when the provider omits one
    pub const DEFAULT_MIME_TYPE: &str = "image/png";
}

/// Fixed keys for locally persisted records
pub mod storage_keys {
    /// Last generated plan
    pub const FITNESS_PLAN: &str = "fitness_plan";
    /// Last submitted profile
    pub const USER_DATA: &str = "user_data";
}

/// Network defaults
pub mod network {
    /// Default HTTP port for the plan server
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    /// Default outbound request timeout in seconds
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;
}

/// Service identity used in logs
pub mod service_names {
    /// Plan server service name
    pub const FITPLAN_SERVER: &str = "fitplan-server";
}
