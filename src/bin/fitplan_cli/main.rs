// ABOUTME: fitplan-cli - command-line client for plan generation and image lookup
// ABOUTME: Generates, shows and clears the locally stored plan and resolves images
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Generate a plan from a profile file and store it
//! fitplan-cli plan generate --profile profile.json
//!
//! # Show the stored plan
//! fitplan-cli plan show
//!
//! # Print the prompt a profile would produce, without calling the model
//! fitplan-cli plan prompt --profile profile.json
//!
//! # Resolve an image for an exercise or a meal
//! fitplan-cli image "Goblet Squat" --category exercise
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fitplan_server::{
    config::{self, AppConfig},
    errors::AppResult,
    images::ImageCategory,
    logging::LoggingConfig,
    services::FitnessPlanService,
    storage::PlanStore,
};
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "fitplan-cli",
    about = "Fitness plan CLI",
    long_about = "Generate AI workout and diet plans, manage the locally stored plan, and resolve exercise and meal images."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Plan commands
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },

    /// Resolve an image for an exercise or meal name
    Image {
        /// Exercise or meal name
        name: String,

        /// Image category
        #[arg(long, value_parser = parse_category, default_value = "exercise")]
        category: ImageCategory,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum PlanCommand {
    /// Generate a plan from a profile JSON file and store it
    Generate {
        /// Profile JSON file
        #[arg(long)]
        profile: PathBuf,
    },

    /// Show the stored plan
    Show {
        /// Print raw JSON instead of the formatted view
        #[arg(long)]
        json: bool,
    },

    /// Remove the stored plan
    Clear,

    /// Print the generation prompt for a profile without calling the model
    Prompt {
        /// Profile JSON file
        #[arg(long)]
        profile: PathBuf,
    },
}

fn parse_category(value: &str) -> std::result::Result<ImageCategory, String> {
    value.parse().map_err(|e: fitplan_server::errors::AppError| e.message)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv_error = config::load_dotenv();
    if let Err(e) = LoggingConfig::for_cli(cli.verbose).init() {
        eprintln!("{e}");
    }
    if let Some(e) = dotenv_error {
        debug!("No .env file loaded: {e}");
    }

    let mut config = AppConfig::from_env()
        .map_err(|e| fitplan_server::errors::AppError::config(format!("{e:#}")))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    debug!(data_dir = %config.data_dir.display(), "fitplan-cli starting");

    let store = PlanStore::new(config.data_dir.clone());

    match cli.command {
        Command::Plan { action } => match action {
            PlanCommand::Generate { profile } => {
                let service = FitnessPlanService::from_config(&config)?;
                commands::plan::generate(&service, &store, &profile).await?;
            }
            PlanCommand::Show { json } => commands::plan::show(&store, json).await?,
            PlanCommand::Clear => commands::plan::clear(&store).await?,
            PlanCommand::Prompt { profile } => commands::plan::prompt(&profile).await?,
        },
        Command::Image { name, category } => {
            let service = FitnessPlanService::from_config(&config)?;
            commands::image::resolve(&service, &name, category).await;
        }
    }

    Ok(())
}
