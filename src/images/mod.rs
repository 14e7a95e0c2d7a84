// ABOUTME: Image acquisition for exercises and meals with a deterministic fallback
// ABOUTME: Shared image types, the primary provider contract and its failure classes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Image Acquisition
//!
//! Exercise and meal pictures come from a generative image provider when one
//! is configured and healthy, and otherwise from an authentication-free
//! fallback endpoint that renders any sanitized text prompt.
//!
//! - [`ImageProvider`]: primary provider contract ([`GeminiImageProvider`]).
//! - [`ImageFallbackChain`]: tries the primary provider and collapses every
//!   failure into a fallback URL plus a human-readable note.
//! - [`ImageCache`]: append-only cache of resolved outcomes.

mod cache;
mod chain;
mod fallback;
mod gemini;

pub use cache::ImageCache;
pub use chain::ImageFallbackChain;
pub use fallback::{build_fallback_url, sanitize_prompt};
pub use gemini::GeminiImageProvider;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;

/// Subject category of a requested image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageCategory {
    /// Exercise demonstration photo
    Exercise,
    /// Meal or snack photo
    Food,
}

impl ImageCategory {
    /// Wire name of the category
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exercise => "exercise",
            Self::Food => "food",
        }
    }
}

impl fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exercise" => Ok(Self::Exercise),
            "food" => Ok(Self::Food),
            other => Err(AppError::invalid_input(format!(
                "Unknown image type '{other}', expected 'exercise' or 'food'"
            ))),
        }
    }
}

/// A renderable image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    /// Remote URL fetched by the renderer
    Remote(String),
    /// Self-contained image rendered as a `data:` URI
    Inline {
        /// Declared media type
        mime_type: String,
        /// Base64 payload
        data: String,
    },
}

impl ImageReference {
    /// Whether the image is embedded rather than fetched
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self, Self::Inline { .. })
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::Inline { mime_type, data } => write!(f, "data:{mime_type};base64,{data}"),
        }
    }
}

impl Serialize for ImageReference {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which provider produced an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// The generative primary provider
    Primary,
    /// The authentication-free fallback endpoint
    Fallback,
}

/// Result of running the image chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOutcome {
    /// Resolved image
    pub reference: ImageReference,
    /// Why the fallback was used, when it was
    pub note: Option<String>,
    /// Provider that produced the reference
    pub source: ImageSource,
}

/// Inline image returned by a primary provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Declared media type
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

/// Failure classes of a primary image provider
///
/// These never leave the image chain; each renders the note attached to the
/// fallback reference.
#[derive(Debug, Error)]
pub enum ImageProviderError {
    /// No credential configured for the provider
    #[error("Used fallback image provider because {provider} key is missing.")]
    NotConfigured {
        /// Provider display name
        provider: &'static str,
    },
    /// The configured model has been retired (HTTP 410)
    #[error("Used fallback image provider because {provider} image model '{model}' is no longer available (status {status}).")]
    ModelRetired {
        /// Provider display name
        provider: &'static str,
        /// Retired model identifier
        model: String,
        /// HTTP status, always 410
        status: u16,
    },
    /// Any other non-success HTTP status
    #[error("Used fallback image provider because {provider} failed with status {status}.")]
    Status {
        /// Provider display name
        provider: &'static str,
        /// HTTP status
        status: u16,
    },
    /// Successful response without an inline image part
    #[error("Used fallback image provider because {provider} returned no image data.")]
    MissingPayload {
        /// Provider display name
        provider: &'static str,
    },
    /// The request could not be sent or the response could not be read
    #[error("Internal error during image generation. Used fallback provider.")]
    Transport(#[source] reqwest::Error),
    /// The response body or image payload is not what the provider documents
    #[error("Internal error during image generation. Used fallback provider.")]
    MalformedBody(String),
}

impl ImageProviderError {
    /// Whether the failure is unexpected, so the fallback uses the generic
    /// placeholder prompt instead of the composed one
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::MalformedBody(_))
    }
}

/// Primary (generative) image provider
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Human-readable display name used in fallback notes
    fn display_name(&self) -> &'static str;

    /// Generate an image for a fully composed prompt
    ///
    /// # Errors
    ///
    /// Returns the [`ImageProviderError`] class of the failure.
    async fn generate(&self, prompt: &str) -> Result<InlineImage, ImageProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("exercise".parse::<ImageCategory>().ok(), Some(ImageCategory::Exercise));
        assert_eq!(" Food ".parse::<ImageCategory>().ok(), Some(ImageCategory::Food));
        assert!("selfie".parse::<ImageCategory>().is_err());
    }

    #[test]
    fn test_inline_reference_renders_data_uri() {
        let reference = ImageReference::Inline {
            mime_type: "image/jpeg".to_owned(),
            data: "AAAA".to_owned(),
        };
        assert_eq!(reference.to_string(), "data:image/jpeg;base64,AAAA");
        assert_eq!(serde_json::to_value(&reference).unwrap(), "data:image/jpeg;base64,AAAA");
    }

    #[test]
    fn test_error_notes() {
        assert_eq!(
            ImageProviderError::NotConfigured { provider: "Gemini" }.to_string(),
            "Used fallback image provider because Gemini key is missing."
        );
        assert_eq!(
            ImageProviderError::Status { provider: "Gemini", status: 429 }.to_string(),
            "Used fallback image provider because Gemini failed with status 429."
        );
        assert!(ImageProviderError::MalformedBody("x".to_owned()).is_unexpected());
        assert!(!ImageProviderError::MissingPayload { provider: "Gemini" }.is_unexpected());
    }
}
