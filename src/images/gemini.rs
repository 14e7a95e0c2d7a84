// ABOUTME: Gemini image generation provider returning inline base64 images
// ABOUTME: Classifies status, payload and transport failures for the fallback chain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::{ImageProvider, ImageProviderError, InlineImage};
use crate::constants::gemini::{API_BASE_URL, DEFAULT_IMAGE_MODEL, MODEL_RETIRED_STATUS};
use crate::constants::images::DEFAULT_MIME_TYPE;

pub(super) const DISPLAY_NAME: &str = "Gemini";

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    candidates: Vec<ImageCandidate>,
}

#[derive(Debug, Deserialize)]
struct ImageCandidate {
    content: Option<ImageContent>,
}

#[derive(Debug, Deserialize)]
struct ImageContent {
    #[serde(default, alias = "Parts")]
    parts: Vec<ImagePart>,
}

/// Response part; the API has used both snake and camel case for inline data
#[derive(Debug, Deserialize)]
struct ImagePart {
    #[serde(alias = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    #[serde(alias = "mimeType")]
    mime_type: Option<String>,
    data: Option<String>,
}

/// Google Gemini image provider
pub struct GeminiImageProvider {
    api_key: String,
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiImageProvider {
    /// Create a provider for the default image model
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: API_BASE_URL.to_owned(),
            model: DEFAULT_IMAGE_MODEL.to_owned(),
        }
    }

    /// Use a different image model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the provider at a different API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies)
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn classify_status(&self, status: u16) -> ImageProviderError {
        if status == MODEL_RETIRED_STATUS {
            warn!(model = %self.model, status, "Gemini image model retired");
            ImageProviderError::ModelRetired {
                provider: self.display_name(),
                model: self.model.clone(),
                status,
            }
        } else {
            ImageProviderError::Status {
                provider: self.display_name(),
                status,
            }
        }
    }

    /// First inline image part of the first candidate
    fn extract_image(response: ImageResponse) -> Result<InlineImage, ImageProviderError> {
        let inline = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.inline_data))
            .ok_or(ImageProviderError::MissingPayload {
                provider: DISPLAY_NAME,
            })?;

        let data = inline.data.unwrap_or_default();
        if data.is_empty() {
            return Err(ImageProviderError::MissingPayload {
                provider: DISPLAY_NAME,
            });
        }
        STANDARD
            .decode(data.as_bytes())
            .map_err(|e| ImageProviderError::MalformedBody(format!("invalid base64 image: {e}")))?;

        Ok(InlineImage {
            mime_type: inline
                .mime_type
                .filter(|mime| !mime.is_empty())
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_owned()),
            data,
        })
    }
}

#[async_trait]
impl ImageProvider for GeminiImageProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<InlineImage, ImageProviderError> {
        let request = ImageRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        debug!("Sending image request to Gemini API");

        let response = self
            .client
            .post(self.build_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ImageProviderError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ImageProviderError::Transport(e.without_url()))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Gemini image API error");
            return Err(self.classify_status(status.as_u16()));
        }

        let parsed: ImageResponse = serde_json::from_str(&body)
            .map_err(|e| ImageProviderError::MalformedBody(e.to_string()))?;

        let image = Self::extract_image(parsed)?;
        debug!(mime_type = %image.mime_type, "Received inline image from Gemini");
        Ok(image)
    }
}

impl Debug for GeminiImageProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiImageProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<InlineImage, ImageProviderError> {
        GeminiImageProvider::extract_image(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_extracts_snake_case_inline_data() {
        let image = parse(
            r#"{"candidates": [{"content": {"parts": [{"text": "here"}, {"inline_data": {"mime_type": "image/jpeg", "data": "AAAA"}}]}}]}"#,
        )
        .unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "AAAA");
    }

    #[test]
    fn test_extracts_camel_case_inline_data_with_default_mime() {
        let image =
            parse(r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "AAAA"}}]}}]}"#)
                .unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_text_only_response_is_missing_payload() {
        let err = parse(r#"{"candidates": [{"content": {"parts": [{"text": "no"}]}}]}"#).unwrap_err();
        assert!(matches!(err, ImageProviderError::MissingPayload { .. }));

        let err = parse(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, ImageProviderError::MissingPayload { .. }));
    }

    #[test]
    fn test_invalid_base64_is_malformed() {
        let err = parse(r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "%%%"}}]}}]}"#)
            .unwrap_err();
        assert!(matches!(err, ImageProviderError::MalformedBody(_)));
    }

    #[test]
    fn test_retired_model_is_classified_distinctly() {
        let provider = GeminiImageProvider::new("key").with_model("old-image-model");
        assert!(matches!(
            provider.classify_status(410),
            ImageProviderError::ModelRetired { status: 410, .. }
        ));
        assert!(matches!(
            provider.classify_status(503),
            ImageProviderError::Status { status: 503, .. }
        ));
    }
}
