// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Image command for fitplan-cli
// ABOUTME: Resolves an exercise or meal image through the cached fallback chain

use fitplan_server::{images::ImageCategory, services::FitnessPlanService};

use crate::helpers::display::display_image_outcome;

/// Resolve and print an image reference
pub async fn resolve(service: &FitnessPlanService, name: &str, category: ImageCategory) {
    match service.resolve_image(name, category).await {
        Some(outcome) => display_image_outcome(name, category, &outcome),
        None => println!("Image unavailable: empty name."),
    }
}
