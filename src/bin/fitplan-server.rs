// ABOUTME: HTTP server binary exposing plan and image generation
// ABOUTME: Loads configuration and logging, then serves the axum router until Ctrl+C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fitness Plan Server Binary
//!
//! Serves `POST /api/generate-plan`, `POST /api/generate-image` and
//! `GET /health`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use fitplan_server::{
    config::{self, AppConfig},
    logging,
    routes::app_router,
    services::FitnessPlanService,
};
use tracing::{info, warn};

/// Command-line arguments for the server
#[derive(Parser)]
#[command(name = "fitplan-server")]
#[command(about = "Fitness plan server - AI workout and diet plans with image fallback")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG and LOG_FORMAT may come from .env
    let dotenv_error = config::load_dotenv();
    logging::init_from_env()?;
    if let Some(e) = dotenv_error {
        warn!("No .env file found or failed to load: {e}");
    }

    let mut config = AppConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http.port = http_port;
    }
    config.log_summary();

    let service = Arc::new(FitnessPlanService::from_config(&config)?);
    let app = app_router(service);

    let addr: SocketAddr = format!("{}:{}", args.bind, config.http.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Fitness plan server listening on http://{addr}");
    info!("  POST /api/generate-plan");
    info!("  POST /api/generate-image");
    info!("  GET  /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Fitness plan server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
}
