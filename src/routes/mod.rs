// ABOUTME: Route module organization for the plan server HTTP endpoints
// ABOUTME: Assembles plan, image and health routes with tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to [`FitnessPlanService`].

/// Health check routes
pub mod health;
/// Image generation routes
pub mod images;
/// Plan generation routes
pub mod plan;

pub use health::HealthRoutes;
pub use images::{ImageRequest, ImageResponse, ImageRoutes};
pub use plan::PlanRoutes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::FitnessPlanService;

/// Build the complete application router
pub fn app_router(service: Arc<FitnessPlanService>) -> Router {
    Router::new()
        .merge(PlanRoutes::routes(Arc::clone(&service)))
        .merge(ImageRoutes::routes(Arc::clone(&service)))
        .merge(HealthRoutes::routes(service))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
