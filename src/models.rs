// ABOUTME: Domain models for user profiles and generated fitness plans
// ABOUTME: FitnessPlan is only constructible through the plan validator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - [`UserProfile`]: the form inputs a plan is generated from. All fields are
//!   plain strings; numeric fields are not parsed at this layer.
//! - [`FitnessPlan`]: the canonical, validated plan. Its fields are private and
//!   it deserializes through the validator, so every instance in the program
//!   has passed the schema gate.

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// User profile submitted from the planning form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Age in years, as entered
    pub age: String,
    /// Gender, as entered
    pub gender: String,
    /// Height in centimeters, as entered
    pub height: String,
    /// Weight in kilograms, as entered
    pub weight: String,
    /// Fitness goal identifier (e.g. `muscle_gain`)
    pub fitness_goal: String,
    /// Fitness level identifier (e.g. `beginner`)
    pub fitness_level: String,
    /// Where workouts happen (e.g. `home`, `gym`)
    pub workout_location: String,
    /// Dietary preference (e.g. `vegetarian`)
    pub dietary_preferences: String,
    /// Optional medical history notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    /// Optional self-reported stress level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<String>,
}

impl UserProfile {
    /// Names of required fields that are empty or whitespace-only
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("age", &self.age),
            ("gender", &self.gender),
            ("height", &self.height),
            ("weight", &self.weight),
            ("fitnessGoal", &self.fitness_goal),
            ("fitnessLevel", &self.fitness_level),
            ("workoutLocation", &self.workout_location),
            ("dietaryPreferences", &self.dietary_preferences),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Ensure every required field is populated before a plan request is issued
    ///
    /// # Errors
    ///
    /// Returns a `MissingRequiredField` error naming every empty field.
    pub fn validate(&self) -> AppResult<()> {
        let missing = self.missing_required_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::missing_fields(&missing))
        }
    }

    /// Medical history, or `None` when absent or blank
    #[must_use]
    pub fn medical_history(&self) -> Option<&str> {
        non_blank(self.medical_history.as_deref())
    }

    /// Stress level, or `None` when absent or blank
    #[must_use]
    pub fn stress_level(&self) -> Option<&str> {
        non_blank(self.stress_level.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A single exercise within a daily routine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Set count or range (e.g. `3-4`)
    pub sets: String,
    /// Repetition count or range (e.g. `10-15`)
    pub reps: String,
    /// Rest between sets (e.g. `60s`)
    pub rest: String,
    /// Short description
    pub description: String,
}

/// One day of the workout plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyRoutine {
    /// Day label and focus
    pub day: String,
    /// Ordered exercises for the day
    pub exercises: Vec<Exercise>,
}

/// Workout section of a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    /// Ordered daily routines
    pub daily_routines: Vec<DailyRoutine>,
}

/// The four recognized meal slots; each defaults to an empty string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meals {
    /// Breakfast suggestion
    pub breakfast: String,
    /// Lunch suggestion
    pub lunch: String,
    /// Dinner suggestion
    pub dinner: String,
    /// Snack options
    pub snacks: String,
}

/// Diet section of a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DietPlan {
    /// Meal suggestions
    pub meals: Meals,
}

/// Validated workout and diet plan
///
/// Instances come from [`crate::plan::validate_plan`] (or deserialization,
/// which runs the same validator). A delivered plan is never mutated; a
/// regeneration builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct FitnessPlan {
    workout: WorkoutPlan,
    diet: DietPlan,
    tips: Vec<String>,
    motivation: String,
}

impl FitnessPlan {
    /// Assemble a plan from already-normalized sections
    pub(crate) const fn from_sections(
        workout: WorkoutPlan,
        diet: DietPlan,
        tips: Vec<String>,
        motivation: String,
    ) -> Self {
        Self {
            workout,
            diet,
            tips,
            motivation,
        }
    }

    /// Workout section
    #[must_use]
    pub const fn workout(&self) -> &WorkoutPlan {
        &self.workout
    }

    /// Daily routines, in order
    #[must_use]
    pub fn daily_routines(&self) -> &[DailyRoutine] {
        &self.workout.daily_routines
    }

    /// Diet section
    #[must_use]
    pub const fn diet(&self) -> &DietPlan {
        &self.diet
    }

    /// Meal suggestions
    #[must_use]
    pub const fn meals(&self) -> &Meals {
        &self.diet.meals
    }

    /// Short tips
    #[must_use]
    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    /// Motivation line, never empty
    #[must_use]
    pub fn motivation(&self) -> &str {
        &self.motivation
    }
}

impl TryFrom<serde_json::Value> for FitnessPlan {
    type Error = AppError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        crate::plan::validate_plan(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_profile() -> UserProfile {
        UserProfile {
            name: "Ana".to_owned(),
            age: "29".to_owned(),
            gender: "female".to_owned(),
            height: "168".to_owned(),
            weight: "61".to_owned(),
            fitness_goal: "muscle_gain".to_owned(),
            fitness_level: "intermediate".to_owned(),
            workout_location: "gym".to_owned(),
            dietary_preferences: "vegetarian".to_owned(),
            medical_history: None,
            stress_level: Some("  ".to_owned()),
        }
    }

    #[test]
    fn test_complete_profile_validates() {
        assert!(complete_profile().validate().is_ok());
    }

    #[test]
    fn test_blank_required_fields_are_reported() {
        let profile = UserProfile {
            name: " ".to_owned(),
            weight: String::new(),
            ..complete_profile()
        };
        assert_eq!(profile.missing_required_fields(), vec!["name", "weight"]);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_optional_fields_treat_blank_as_absent() {
        let profile = complete_profile();
        assert_eq!(profile.medical_history(), None);
        assert_eq!(profile.stress_level(), None);
    }

    #[test]
    fn test_profile_uses_camel_case_keys() {
        let json = serde_json::to_value(complete_profile()).unwrap_or_default();
        assert_eq!(json["fitnessGoal"], "muscle_gain");
        assert_eq!(json["dietaryPreferences"], "vegetarian");
        assert!(json.get("medicalHistory").is_none());
    }
}
