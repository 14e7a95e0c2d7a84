// ABOUTME: Schema gate between recovered JSON and the canonical FitnessPlan
// ABOUTME: Requires workout and diet sections, then normalizes every optional slot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::Value;

use super::recovery::is_section_object;
use super::scalar_text;
use crate::constants::plan_defaults;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyRoutine, DietPlan, Exercise, FitnessPlan, Meals, WorkoutPlan};

/// Validate and normalize a loosely-typed plan candidate
///
/// Normalization rules:
/// - `workout.dailyRoutines` that is not an array becomes empty; entries that
///   are not objects are dropped; scalar fields are rendered as text and
///   missing fields become empty strings.
/// - each of the four meal slots defaults to an empty string on its own.
/// - `tips` that is not an array becomes empty; non-scalar entries are dropped.
/// - an absent or blank `motivation` takes the fixed default line.
///
/// # Errors
///
/// Returns `PlanSchemaViolation` when the candidate is not an object or its
/// `workout` or `diet` section is missing or not an object.
pub fn validate_plan(candidate: &Value) -> AppResult<FitnessPlan> {
    let Some(object) = candidate.as_object() else {
        return Err(AppError::schema_violation(
            "Model output is not a JSON object",
        ));
    };

    let missing: Vec<&str> = ["workout", "diet"]
        .into_iter()
        .filter(|section| !is_section_object(object, section))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::schema_violation(format!(
            "Plan is missing required sections: {}",
            missing.join(", ")
        )));
    }

    let workout = WorkoutPlan {
        daily_routines: candidate["workout"]
            .get("dailyRoutines")
            .and_then(Value::as_array)
            .map(|routines| routines.iter().filter_map(normalize_routine).collect())
            .unwrap_or_default(),
    };

    let meals = &candidate["diet"]["meals"];
    let diet = DietPlan {
        meals: Meals {
            breakfast: text_field(meals, "breakfast"),
            lunch: text_field(meals, "lunch"),
            dinner: text_field(meals, "dinner"),
            snacks: text_field(meals, "snacks"),
        },
    };

    let tips = candidate
        .get("tips")
        .and_then(Value::as_array)
        .map(|tips| tips.iter().filter_map(scalar_text).collect())
        .unwrap_or_default();

    let motivation = Some(text_field(candidate, "motivation"))
        .filter(|line| !line.trim().is_empty())
        .unwrap_or_else(|| plan_defaults::VALIDATED_MOTIVATION.to_owned());

    Ok(FitnessPlan::from_sections(workout, diet, tips, motivation))
}

fn normalize_routine(entry: &Value) -> Option<DailyRoutine> {
    entry.as_object()?;
    let exercises = entry
        .get("exercises")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| Exercise {
                    name: text_field(item, "name"),
                    sets: text_field(item, "sets"),
                    reps: text_field(item, "reps"),
                    rest: text_field(item, "rest"),
                    description: text_field(item, "description"),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(DailyRoutine {
        day: text_field(entry, "day"),
        exercises,
    })
}

fn text_field(value: &Value, key: &str) -> String {
    value.get(key).and_then(scalar_text).unwrap_or_default()
}
