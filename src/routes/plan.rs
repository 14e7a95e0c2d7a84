// ABOUTME: Plan generation route handler
// ABOUTME: Accepts a user profile and returns a validated fitness plan or an error body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::errors::AppError;
use crate::models::{FitnessPlan, UserProfile};
use crate::services::FitnessPlanService;

/// Plan generation routes
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create the plan routes
    pub fn routes(service: Arc<FitnessPlanService>) -> Router {
        Router::new()
            .route("/api/generate-plan", post(Self::handle_generate_plan))
            .with_state(service)
    }

    /// Handle plan generation
    ///
    /// A failed generation returns the classified error; the caller keeps
    /// whatever plan it already had.
    async fn handle_generate_plan(
        State(service): State<Arc<FitnessPlanService>>,
        body: Result<Json<UserProfile>, JsonRejection>,
    ) -> Result<Json<FitnessPlan>, AppError> {
        let Json(profile) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid profile: {}", e.body_text())))?;
        let plan = service.generate_plan(&profile).await?;
        Ok(Json(plan))
    }
}
