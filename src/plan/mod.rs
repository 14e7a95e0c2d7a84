// ABOUTME: Plan parsing pipeline from raw model text to a validated FitnessPlan
// ABOUTME: Fragment extraction, recovery cascade, schema validation and the candidate type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Pipeline
//!
//! Model output moves through three states, modelled by [`PlanCandidate`]:
//!
//! ```text
//! RawText --recover()--> Parsed --validate()--> Validated(FitnessPlan)
//! ```
//!
//! Only the validated state holds a [`FitnessPlan`]; rendering and storage
//! code never sees the untyped intermediate.

/// Balanced-bracket and quoted-field extractors
pub mod extract;
/// Strict-to-lenient recovery cascade
pub mod recovery;
/// Schema gate and normalizer
pub mod validation;

pub use extract::{extract_bracket_block, extract_string_field, Delimiters};
pub use recovery::{
    recover_plan, strip_code_fences, Fragment, FragmentReport, FragmentStatus, RecoveredPlan,
    RecoveryStage,
};
pub use validation::validate_plan;

use serde_json::Value;

use crate::errors::AppResult;
use crate::models::FitnessPlan;

/// Model output at each stage of the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum PlanCandidate {
    /// Text exactly as the model returned it
    RawText(String),
    /// JSON-shaped value recovered from the text, not yet validated
    Parsed(RecoveredPlan),
    /// Plan that passed the schema gate
    Validated(FitnessPlan),
}

impl PlanCandidate {
    /// Run the recovery cascade; later states are returned unchanged
    #[must_use]
    pub fn recover(self) -> Self {
        match self {
            Self::RawText(text) => Self::Parsed(recover_plan(&text)),
            other => other,
        }
    }

    /// Recover if needed, then validate into a [`FitnessPlan`]
    ///
    /// # Errors
    ///
    /// Returns `PlanSchemaViolation` when the recovered value lacks the
    /// `workout` or `diet` section.
    pub fn validate(self) -> AppResult<FitnessPlan> {
        match self {
            Self::RawText(text) => validate_plan(recover_plan(&text).value()),
            Self::Parsed(recovered) => validate_plan(recovered.value()),
            Self::Validated(plan) => Ok(plan),
        }
    }
}

/// Parse raw model output into a validated plan
///
/// # Errors
///
/// Returns `PlanSchemaViolation` when no usable plan could be recovered.
pub fn parse_plan(raw: &str) -> AppResult<FitnessPlan> {
    PlanCandidate::RawText(raw.to_owned()).validate()
}

/// Text form of a scalar JSON value; `None` for null, arrays and objects
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
