// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Reports liveness and whether plan generation is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::services::FitnessPlanService;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(service: Arc<FitnessPlanService>) -> Router {
        async fn health_handler(
            State(service): State<Arc<FitnessPlanService>>,
        ) -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "plan_generation": service.can_generate_plans(),
                "primary_images": service.has_primary_images(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        Router::new()
            .route("/health", get(health_handler))
            .with_state(service)
    }
}
