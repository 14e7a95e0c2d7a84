// ABOUTME: Image generation route handler for exercises and meals
// ABOUTME: Always answers 200 with an image URL once the request itself is valid
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::images::{ImageCategory, ImageReference};
use crate::services::FitnessPlanService;

const MISSING_FIELDS_MESSAGE: &str = "Missing prompt or type in request body";

/// Image generation request body
#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    /// Exercise or meal name
    #[serde(default)]
    pub prompt: Option<String>,
    /// `exercise` or `food`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Successful image response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    /// Remote URL or `data:` URI
    pub image_url: ImageReference,
    /// Why the fallback provider was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageErrorBody {
    error: String,
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ImageErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Image routes
pub struct ImageRoutes;

impl ImageRoutes {
    /// Create the image routes
    pub fn routes(service: Arc<FitnessPlanService>) -> Router {
        Router::new()
            .route("/api/generate-image", post(Self::handle_generate_image))
            .with_state(service)
    }

    /// Handle image generation
    async fn handle_generate_image(
        State(service): State<Arc<FitnessPlanService>>,
        body: Result<Json<ImageRequest>, JsonRejection>,
    ) -> Response {
        let Ok(Json(request)) = body else {
            return bad_request(MISSING_FIELDS_MESSAGE);
        };
        let prompt = request.prompt.as_deref().map(str::trim).unwrap_or_default();
        let kind = request.kind.as_deref().map(str::trim).unwrap_or_default();
        if prompt.is_empty() || kind.is_empty() {
            return bad_request(MISSING_FIELDS_MESSAGE);
        }
        let category = match kind.parse::<ImageCategory>() {
            Ok(category) => category,
            Err(e) => return bad_request(e.message),
        };

        let Some(outcome) = service.resolve_image(prompt, category).await else {
            return bad_request(MISSING_FIELDS_MESSAGE);
        };
        debug!(source = ?outcome.source, "Image request served");
        Json(ImageResponse {
            image_url: outcome.reference,
            note: outcome.note,
        })
        .into_response()
    }
}
