// ABOUTME: Main library entry point for the fitness plan generator
// ABOUTME: Plan prompting, model output recovery and validation, image fallback, HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitplan Server
//!
//! Turns a user profile into a structured workout and diet plan using a
//! generative text model, and finds an image for every exercise and meal.
//!
//! ## Features
//!
//! - **Prompt construction**: deterministic prompt with explicit size ceilings
//! - **Resilient parsing**: strict parse, fence stripping, then piecewise recovery
//!   of each plan section from truncated or chatty model output
//! - **Validation**: one normalized [`models::FitnessPlan`] shape for rendering
//! - **Image fallback**: inline images from Gemini, or an authentication-free
//!   fallback URL with a note explaining why
//!
//! ## Architecture
//!
//! - **llm**: text model provider trait, Gemini client and prompt builder
//! - **plan**: recovery cascade and schema validation
//! - **images**: image provider trait, fallback chain and cache
//! - **services**: the plan service shared by routes and the CLI
//! - **routes**: axum routes for plan, image and health endpoints
//! - **storage**: on-disk store for the current plan and profile
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitplan_server::plan::parse_plan;
//!
//! # fn main() -> fitplan_server::errors::AppResult<()> {
//! let raw = "```json\n{\"workout\": {\"dailyRoutines\": []}, \"diet\": {\"meals\": {\"breakfast\": \"Oats\"}}}\n```";
//! let plan = parse_plan(raw)?;
//! assert_eq!(plan.meals().breakfast, "Oats");
//! # Ok(())
//! # }
//! ```

/// Error types and codes shared with the core crate
pub use fitplan_core::errors;

/// Application constants
pub use fitplan_core::constants;

/// Configuration from the environment
pub mod config;

/// Image providers, fallback chain and cache
pub mod images;

/// Text model providers and prompt construction
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Profile and plan data models
pub mod models;

/// Model output recovery and plan validation
pub mod plan;

/// HTTP routes
pub mod routes;

/// Plan and image service
pub mod services;

/// Local plan and profile persistence
pub mod storage;
