// ABOUTME: Plan generation prompt built from a user profile
// ABOUTME: Embeds every profile field and the response shape the recovery engine expects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Prompt
//!
//! The prompt steers the model toward a single compact JSON object. It is a
//! best-effort contract: the recovery engine handles responses that ignore it.
//! The response example is loaded at compile time from a JSON file for easy
//! maintenance.

use crate::constants::plan_defaults::{NO_MEDICAL_HISTORY, STRESS_NOT_SPECIFIED};
use crate::constants::prompt_limits::{
    MAX_DESCRIPTION_WORDS, MAX_EXERCISES_PER_DAY, MAX_RESPONSE_CHARS, MAX_ROUTINE_DAYS,
};
use crate::models::UserProfile;

/// Example of the exact JSON shape requested from the model
pub const PLAN_RESPONSE_EXAMPLE: &str = include_str!("plan_response_example.json");

/// Build the plan generation prompt for a profile
///
/// Deterministic: the same profile always yields the same prompt.
#[must_use]
pub fn build_plan_prompt(profile: &UserProfile) -> String {
    let medical = profile.medical_history().unwrap_or(NO_MEDICAL_HISTORY);
    let stress = profile.stress_level().unwrap_or(STRESS_NOT_SPECIFIED);

    format!(
        "You are generating a JSON object for a fitness app.

CRITICAL RULES:
- Return ONLY a single valid JSON object.
- Do NOT include markdown, backticks, or any text outside the JSON.
- Keep the total response UNDER {MAX_RESPONSE_CHARS} characters.
- Use short, single-sentence descriptions.

User Profile:
- Name: {name}
- Age: {age}
- Gender: {gender}
- Height: {height} cm
- Weight: {weight} kg
- Goal: {goal}
- Level: {level}
- Location: {location}
- Diet: {diet}
- Medical: {medical}
- Stress: {stress}

Return JSON in EXACTLY this structure (no extra keys):

{example}
Constraints:
- Limit to ONLY {MAX_ROUTINE_DAYS} days in \"dailyRoutines\".
- Each day must have at MOST {MAX_EXERCISES_PER_DAY} exercises.
- Descriptions MUST be a single sentence of at most {MAX_DESCRIPTION_WORDS} words.
",
        name = profile.name,
        age = profile.age,
        gender = profile.gender,
        height = profile.height,
        weight = profile.weight,
        goal = profile.fitness_goal,
        level = profile.fitness_level,
        location = profile.workout_location,
        diet = profile.dietary_preferences,
        example = PLAN_RESPONSE_EXAMPLE,
    )
}
