// ABOUTME: Strict-to-lenient recovery cascade turning raw model text into a plan-shaped JSON value
// ABOUTME: Strict parse, code-fence stripping, then independent per-fragment extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Recovery Engine
//!
//! Text models do not reliably honor "return only JSON". This engine applies,
//! in order:
//!
//! 1. **Strict parse** of the whole text. Accepted when it is an object with
//!    non-null `workout` and `diet`; `tips`/`motivation` are defaulted.
//! 2. **Fence stripping** of a leading ```` ``` ```` marker (optionally with a
//!    language tag) and a trailing ```` ``` ````. The cleaned text gets one more
//!    strict parse so a fenced document recovers to the same object as the
//!    bare one.
//! 3. **Piecewise recovery** of `dailyRoutines`, `meals`, `tips` and
//!    `motivation`, each parsed on its own. A fragment that fails contributes
//!    a default instead of aborting the recovery.
//!
//! Recovery never fails. When neither `dailyRoutines` nor `meals` could be
//! recovered the assembled value omits `workout` and `diet`, and the
//! validator rejects it as a schema violation.

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::extract::{extract_bracket_block, extract_string_field, mentions_field, Delimiters};
use crate::constants::plan_defaults;

const DAILY_ROUTINES_FIELD: &str = "dailyRoutines";
const MEALS_FIELD: &str = "meals";
const TIPS_FIELD: &str = "tips";
const MOTIVATION_FIELD: &str = "motivation";
const MEAL_KEYS: [&str; 4] = ["breakfast", "lunch", "dinner", "snacks"];

/// Which stage of the cascade produced the recovered value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStage {
    /// The whole text parsed as a plan object
    Strict,
    /// The text parsed as a plan object once its code fence was removed
    Unfenced,
    /// Fragments were extracted individually from fence-stripped text
    Piecewise,
}

/// Outcome of recovering a single fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment<T> {
    /// The fragment was found and parsed
    Recovered(T),
    /// The field does not appear in the text; the slot takes its default
    Absent,
    /// The field appears but its value could not be extracted or parsed
    Malformed {
        /// Extracted text, empty when no balanced block was found
        raw: String,
        /// Why the fragment was rejected
        reason: String,
    },
}

impl<T> Fragment<T> {
    /// Payload-free status, for reporting
    #[must_use]
    pub const fn status(&self) -> FragmentStatus {
        match self {
            Self::Recovered(_) => FragmentStatus::Recovered,
            Self::Absent => FragmentStatus::Absent,
            Self::Malformed { .. } => FragmentStatus::Malformed,
        }
    }

    /// Whether the fragment was recovered
    #[must_use]
    pub const fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }

    /// Recovered value, or `None` for absent and malformed fragments
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Recovered(value) => Some(value),
            Self::Absent | Self::Malformed { .. } => None,
        }
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Fragment<U> {
        match self {
            Self::Recovered(value) => Fragment::Recovered(f(value)),
            Self::Absent => Fragment::Absent,
            Self::Malformed { raw, reason } => Fragment::Malformed { raw, reason },
        }
    }
}

/// Payload-free fragment outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentStatus {
    /// Found and parsed
    Recovered,
    /// Not mentioned in the text
    Absent,
    /// Mentioned but unusable
    Malformed,
}

/// Per-fragment outcomes of a piecewise recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentReport {
    /// `workout.dailyRoutines`
    pub daily_routines: FragmentStatus,
    /// `diet.meals`
    pub meals: FragmentStatus,
    /// `tips`
    pub tips: FragmentStatus,
    /// `motivation`
    pub motivation: FragmentStatus,
}

/// Plan-shaped JSON value produced by the cascade, not yet validated
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredPlan {
    value: Value,
    stage: RecoveryStage,
    fragments: Option<FragmentReport>,
}

impl RecoveredPlan {
    /// Recovered JSON value
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Stage that produced the value
    #[must_use]
    pub const fn stage(&self) -> RecoveryStage {
        self.stage
    }

    /// Fragment outcomes; `None` unless recovered piecewise
    #[must_use]
    pub const fn fragments(&self) -> Option<&FragmentReport> {
        self.fragments.as_ref()
    }
}

/// Run the recovery cascade over raw model output
#[must_use]
pub fn recover_plan(raw: &str) -> RecoveredPlan {
    if let Some(value) = parse_strict(raw) {
        debug!("Model output parsed strictly");
        return RecoveredPlan {
            value,
            stage: RecoveryStage::Strict,
            fragments: None,
        };
    }

    let cleaned = strip_code_fences(raw);
    if cleaned.len() < raw.trim().len() {
        if let Some(value) = parse_strict(cleaned) {
            debug!("Model output parsed strictly after removing code fence");
            return RecoveredPlan {
                value,
                stage: RecoveryStage::Unfenced,
                fragments: None,
            };
        }
    }

    let recovered = recover_piecewise(cleaned);
    debug!(fragments = ?recovered.fragments, "Model output recovered piecewise");
    recovered
}

/// Strip a leading code fence (with optional language tag) and a trailing fence
///
/// A word right after the opening fence is only a language tag when it is
/// alone on the fence line.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```") {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')))
            .unwrap_or(rest.len());
        let after_tag = &rest[tag_len..];
        let line_end = after_tag.find('\n').unwrap_or(after_tag.len());
        let is_tag = after_tag[..line_end].trim().is_empty();
        cleaned = if is_tag { after_tag } else { rest }.trim_start();
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

fn parse_strict(raw: &str) -> Option<Value> {
    let Ok(Value::Object(mut object)) = serde_json::from_str::<Value>(raw) else {
        return None;
    };
    if !is_section_object(&object, "workout") || !is_section_object(&object, "diet") {
        return None;
    }
    default_if_missing(&mut object, TIPS_FIELD, json!([]));
    default_if_missing(
        &mut object,
        MOTIVATION_FIELD,
        json!(plan_defaults::STRICT_MOTIVATION),
    );
    Some(Value::Object(object))
}

/// A required section is present when its key holds a JSON object
pub(super) fn is_section_object(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).is_some_and(Value::is_object)
}

fn has_section(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).is_some_and(|value| !value.is_null())
}

fn default_if_missing(object: &mut Map<String, Value>, key: &str, default: Value) {
    if !has_section(object, key) {
        object.insert(key.to_owned(), default);
    }
}

fn recover_piecewise(cleaned: &str) -> RecoveredPlan {
    let routines = parse_fragment(cleaned, DAILY_ROUTINES_FIELD, Delimiters::Array);
    let meals = parse_fragment(cleaned, MEALS_FIELD, Delimiters::Object).map(|m| normalize_meals(&m));
    let tips = parse_fragment(cleaned, TIPS_FIELD, Delimiters::Array).map(|t| tips_as_text(&t));
    let motivation = match extract_string_field(cleaned, MOTIVATION_FIELD) {
        Some(text) => Fragment::Recovered(text),
        None if mentions_field(cleaned, MOTIVATION_FIELD) => Fragment::Malformed {
            raw: String::new(),
            reason: "no quoted string value".to_owned(),
        },
        None => Fragment::Absent,
    };
    log_malformed(MOTIVATION_FIELD, &motivation);

    let fragments = FragmentReport {
        daily_routines: routines.status(),
        meals: meals.status(),
        tips: tips.status(),
        motivation: motivation.status(),
    };

    let mut plan = Map::new();
    if routines.is_recovered() || meals.is_recovered() {
        let daily_routines = routines.into_option().unwrap_or_else(|| json!([]));
        let meals = meals.into_option().unwrap_or_else(|| normalize_meals(&json!({})));
        plan.insert("workout".to_owned(), json!({ DAILY_ROUTINES_FIELD: daily_routines }));
        plan.insert("diet".to_owned(), json!({ MEALS_FIELD: meals }));
    }
    plan.insert(
        TIPS_FIELD.to_owned(),
        Value::Array(
            tips.into_option()
                .unwrap_or_default()
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
    );
    plan.insert(
        MOTIVATION_FIELD.to_owned(),
        Value::String(
            motivation
                .into_option()
                .unwrap_or_else(|| plan_defaults::RECOVERED_MOTIVATION.to_owned()),
        ),
    );

    RecoveredPlan {
        value: Value::Object(plan),
        stage: RecoveryStage::Piecewise,
        fragments: Some(fragments),
    }
}

fn parse_fragment(cleaned: &str, field: &str, delimiters: Delimiters) -> Fragment<Value> {
    let fragment = match extract_bracket_block(cleaned, field, delimiters) {
        Some(block) => match serde_json::from_str::<Value>(block) {
            Ok(value) => Fragment::Recovered(value),
            Err(e) => Fragment::Malformed {
                raw: block.to_owned(),
                reason: e.to_string(),
            },
        },
        None if mentions_field(cleaned, field) => Fragment::Malformed {
            raw: String::new(),
            reason: "no balanced block follows the field".to_owned(),
        },
        None => Fragment::Absent,
    };
    log_malformed(field, &fragment);
    fragment
}

fn log_malformed<T>(field: &str, fragment: &Fragment<T>) {
    if let Fragment::Malformed { raw, reason } = fragment {
        warn!(field, reason = %reason, raw = %raw, "Could not parse plan fragment");
    }
}

fn normalize_meals(parsed: &Value) -> Value {
    let meals: Map<String, Value> = MEAL_KEYS
        .iter()
        .map(|key| {
            let value = parsed
                .get(*key)
                .filter(|v| !v.is_null())
                .cloned()
                .unwrap_or_else(|| json!(""));
            ((*key).to_owned(), value)
        })
        .collect();
    Value::Object(meals)
}

fn tips_as_text(parsed: &Value) -> Vec<String> {
    parsed
        .as_array()
        .map(|items| items.iter().filter_map(super::scalar_text).collect())
        .unwrap_or_default()
}
