// ABOUTME: Domain service layer shared by the HTTP routes and the CLI
// ABOUTME: Keeps plan and image orchestration out of the transport code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services are reusable across the HTTP server and the command-line client,
//! so both apply the same validation and error classification.

/// Plan generation and image acquisition
pub mod planner;

pub use planner::{FitnessPlanService, GenerationSettings};
