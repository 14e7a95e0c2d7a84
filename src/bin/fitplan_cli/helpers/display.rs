// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for fitplan-cli
// ABOUTME: Provides consistent display functions for plans and image lookups

use fitplan_server::{
    images::{ImageCategory, ImageOutcome, ImageReference, ImageSource},
    models::FitnessPlan,
};

const INLINE_PREVIEW_CHARS: usize = 64;

/// Print a section separator
pub fn display_separator() {
    println!("{}", "=".repeat(50));
}

/// Print a plan: routines, meals, tips and motivation
pub fn display_plan(plan: &FitnessPlan) {
    println!("\nWORKOUT PLAN");
    display_separator();
    for routine in plan.daily_routines() {
        println!("{}", routine.day);
        for exercise in &routine.exercises {
            println!(
                "   - {}: {} sets x {} reps, rest {}",
                exercise.name, exercise.sets, exercise.reps, exercise.rest
            );
            if !exercise.description.is_empty() {
                println!("     {}", exercise.description);
            }
        }
    }

    println!("\nDIET PLAN");
    display_separator();
    let meals = plan.meals();
    println!("   Breakfast: {}", meals.breakfast);
    println!("   Lunch:     {}", meals.lunch);
    println!("   Dinner:    {}", meals.dinner);
    println!("   Snacks:    {}", meals.snacks);

    if !plan.tips().is_empty() {
        println!("\nTIPS");
        display_separator();
        for tip in plan.tips() {
            println!("   * {tip}");
        }
    }

    println!("\n{}", plan.motivation());
}

/// Print the result of an image lookup
pub fn display_image_outcome(name: &str, category: ImageCategory, outcome: &ImageOutcome) {
    println!("\nImage for {category} '{name}'");
    display_separator();
    let source = match outcome.source {
        ImageSource::Primary => "primary",
        ImageSource::Fallback => "fallback",
    };
    println!("   Source: {source}");
    match &outcome.reference {
        ImageReference::Remote(url) => println!("   URL: {url}"),
        ImageReference::Inline { mime_type, data } => {
            let preview: String = data.chars().take(INLINE_PREVIEW_CHARS).collect();
            println!("   Inline {mime_type}, {} base64 chars", data.len());
            println!("   data:{mime_type};base64,{preview}...");
        }
    }
    if let Some(note) = &outcome.note {
        println!("   Note: {note}");
    }
}
