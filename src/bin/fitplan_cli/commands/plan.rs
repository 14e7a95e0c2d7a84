// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Plan commands for fitplan-cli
// ABOUTME: Generates a plan from a profile file, shows or clears the stored plan, prints prompts

use std::path::Path;

use fitplan_server::{
    errors::AppError,
    llm::build_plan_prompt,
    models::UserProfile,
    services::FitnessPlanService,
    storage::PlanStore,
};
use tracing::info;

use crate::helpers::display::{display_plan, display_separator};
use crate::Result;

async fn read_profile(path: &Path) -> Result<UserProfile> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("Cannot read profile {}: {e}", path.display()))
            .with_source(e)
    })?;
    let profile: UserProfile = serde_json::from_str(&raw).map_err(|e| {
        AppError::invalid_input(format!("Invalid profile {}: {e}", path.display())).with_source(e)
    })?;
    profile.validate()?;
    Ok(profile)
}

/// Generate a plan, store it with its profile and print it
pub async fn generate(service: &FitnessPlanService, store: &PlanStore, profile: &Path) -> Result<()> {
    let profile = read_profile(profile).await?;

    println!("Generating plan for goal '{}'...", profile.fitness_goal);
    let plan = service.generate_plan(&profile).await?;

    store.save_profile(&profile).await?;
    store.save_plan(&plan).await?;
    info!(root = %store.root().display(), "Plan stored");

    display_plan(&plan);
    println!("\nSaved to {}", store.root().display());
    Ok(())
}

/// Print the stored plan
pub async fn show(store: &PlanStore, json: bool) -> Result<()> {
    let Some(plan) = store.load_plan().await? else {
        println!("No stored plan. Run `fitplan-cli plan generate --profile <file>` first.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if let Some(profile) = store.load_profile().await? {
        println!(
            "Profile: {} years, {}, goal {}",
            profile.age, profile.gender, profile.fitness_goal
        );
        display_separator();
    }
    display_plan(&plan);
    Ok(())
}

/// Remove the stored plan
pub async fn clear(store: &PlanStore) -> Result<()> {
    if store.clear_plan().await? {
        println!("Stored plan removed.");
    } else {
        println!("No stored plan to remove.");
    }
    Ok(())
}

/// Print the prompt a profile would produce
pub async fn prompt(profile: &Path) -> Result<()> {
    let profile = read_profile(profile).await?;
    println!("{}", build_plan_prompt(&profile));
    Ok(())
}
