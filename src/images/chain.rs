// ABOUTME: Image fallback chain from the generative provider to a deterministic URL
// ABOUTME: Every provider failure collapses into a fallback reference with a note
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::fallback::build_fallback_url;
use super::gemini::DISPLAY_NAME as DEFAULT_PRIMARY;
use super::{ImageCategory, ImageOutcome, ImageProvider, ImageProviderError, ImageReference, ImageSource};
use crate::config::ImageChainConfig;

/// Primary-then-fallback image resolution
///
/// [`resolve`](Self::resolve) cannot fail: once the primary provider is
/// skipped or fails, building the fallback URL from a sanitized prompt always
/// succeeds.
#[derive(Clone)]
pub struct ImageFallbackChain {
    primary: Option<Arc<dyn ImageProvider>>,
    config: ImageChainConfig,
}

impl ImageFallbackChain {
    /// Create a chain; `None` means no primary credential is configured
    #[must_use]
    pub fn new(primary: Option<Arc<dyn ImageProvider>>, config: ImageChainConfig) -> Self {
        Self { primary, config }
    }

    /// Whether a primary provider is configured
    #[must_use]
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Resolve an image for an exercise or meal name
    #[instrument(skip(self), fields(category = %category))]
    pub async fn resolve(&self, subject: &str, category: ImageCategory) -> ImageOutcome {
        let prompt = self.config.describe(category, subject);

        let result = match &self.primary {
            Some(provider) => {
                debug!(
                    provider = provider.display_name(),
                    "Requesting image from primary provider"
                );
                provider.generate(&prompt).await
            }
            None => Err(ImageProviderError::NotConfigured {
                provider: DEFAULT_PRIMARY,
            }),
        };

        match result {
            Ok(image) => ImageOutcome {
                reference: ImageReference::Inline {
                    mime_type: image.mime_type,
                    data: image.data,
                },
                note: None,
                source: ImageSource::Primary,
            },
            Err(failure) => self.fallback(&prompt, category, &failure),
        }
    }

    fn fallback(
        &self,
        prompt: &str,
        category: ImageCategory,
        failure: &ImageProviderError,
    ) -> ImageOutcome {
        let fallback_prompt = if failure.is_unexpected() {
            warn!(error = ?failure, "Unexpected image provider failure, using placeholder prompt");
            self.config.placeholder(category)
        } else {
            prompt
        };
        let note = failure.to_string();
        info!(note = %note, "Using fallback image provider");

        ImageOutcome {
            reference: ImageReference::Remote(build_fallback_url(
                &self.config.fallback_base_url,
                fallback_prompt,
            )),
            note: Some(note),
            source: ImageSource::Fallback,
        }
    }
}

impl std::fmt::Debug for ImageFallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFallbackChain")
            .field("primary", &self.primary.as_ref().map(|p| p.name()))
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::InlineImage;
    use async_trait::async_trait;

    struct Scripted(fn() -> Result<InlineImage, ImageProviderError>);

    #[async_trait]
    impl ImageProvider for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn display_name(&self) -> &'static str {
            "Scripted"
        }

        async fn generate(&self, _prompt: &str) -> Result<InlineImage, ImageProviderError> {
            (self.0)()
        }
    }

    fn chain_with(script: fn() -> Result<InlineImage, ImageProviderError>) -> ImageFallbackChain {
        ImageFallbackChain::new(Some(Arc::new(Scripted(script))), ImageChainConfig::default())
    }

    #[tokio::test]
    async fn test_no_primary_uses_fallback_with_composed_prompt() {
        let chain = ImageFallbackChain::new(None, ImageChainConfig::default());
        let outcome = chain.resolve("Push-up", ImageCategory::Exercise).await;
        assert_eq!(outcome.source, ImageSource::Fallback);
        assert_eq!(
            outcome.note.as_deref(),
            Some("Used fallback image provider because Gemini key is missing.")
        );
        assert!(outcome
            .reference
            .to_string()
            .starts_with("https://image.pollinations.ai/prompt/realistic%20professional%20fitness%20photo%20of%20Pushup%20"));
    }

    #[tokio::test]
    async fn test_inline_image_is_returned_without_note() {
        let chain = chain_with(|| {
            Ok(InlineImage {
                mime_type: "image/png".to_owned(),
                data: "AAAA".to_owned(),
            })
        });
        let outcome = chain.resolve("Oats", ImageCategory::Food).await;
        assert_eq!(outcome.source, ImageSource::Primary);
        assert!(outcome.note.is_none());
        assert_eq!(outcome.reference.to_string(), "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_retired_model_falls_back_like_other_statuses() {
        let retired = chain_with(|| {
            Err(ImageProviderError::ModelRetired {
                provider: "Gemini",
                model: "m".to_owned(),
                status: 410,
            })
        })
        .resolve("Row", ImageCategory::Exercise)
        .await;
        let failed = chain_with(|| {
            Err(ImageProviderError::Status {
                provider: "Gemini",
                status: 500,
            })
        })
        .resolve("Row", ImageCategory::Exercise)
        .await;
        assert_eq!(retired.reference, failed.reference);
        assert_ne!(retired.note, failed.note);
    }

    #[tokio::test]
    async fn test_unexpected_failure_uses_placeholder_prompt() {
        let chain = chain_with(|| Err(ImageProviderError::MalformedBody("bad".to_owned())));
        let outcome = chain.resolve("Salmon", ImageCategory::Food).await;
        assert_eq!(
            outcome.reference.to_string(),
            "https://image.pollinations.ai/prompt/generic%20healthy%20food%20image"
        );
    }
}
