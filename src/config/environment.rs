// ABOUTME: Environment configuration for the plan server and CLI
// ABOUTME: Reads Gemini credentials, models, HTTP settings and the data directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ImageChainConfig;
use crate::constants::{gemini, images, network};

/// Gemini provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Credential for text generation; absence is a configuration error
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Credential for image generation; defaults to `api_key`
    #[serde(skip_serializing)]
    pub image_api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Text model used for plans
    pub text_model: String,
    /// Image model used for exercise and meal pictures
    pub image_model: String,
    /// Sampling temperature for plan generation
    pub temperature: f32,
    /// Output token ceiling for plan generation
    pub max_output_tokens: u32,
}

impl GeminiConfig {
    /// Credential for the image provider, if any
    #[must_use]
    pub fn image_credential(&self) -> Option<&str> {
        self.image_api_key.as_deref().or(self.api_key.as_deref())
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("GeminiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("image_api_key", &redact(&self.image_api_key))
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

/// HTTP server and outbound client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port the plan server listens on
    pub port: u16,
    /// Timeout applied to every outbound provider request, in seconds
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// Outbound request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini provider settings
    pub gemini: GeminiConfig,
    /// HTTP settings
    pub http: HttpConfig,
    /// Directory holding the locally persisted plan and profile
    pub data_dir: PathBuf,
    /// Image fallback chain settings
    pub images: ImageChainConfig,
}

/// Load a `.env` file from the working directory into the process environment
///
/// Variables already set are kept. Returns the load error, if any, so the
/// caller can report it once logging is initialized.
pub fn load_dotenv() -> Option<dotenvy::Error> {
    dotenvy::dotenv().err()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Some(e) = load_dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };
        let secret = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let images = ImageChainConfig::default().with_fallback_base_url(var_or(
            "FITPLAN_FALLBACK_IMAGE_URL",
            images::FALLBACK_BASE_URL,
        ));

        let data_dir = lookup("FITPLAN_DATA_DIR")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(default_data_dir, PathBuf::from);

        Ok(Self {
            gemini: GeminiConfig {
                api_key: secret("GEMINI_API_KEY"),
                image_api_key: secret("GEMINI_IMAGE_API_KEY"),
                base_url: var_or("FITPLAN_GEMINI_BASE_URL", gemini::API_BASE_URL),
                text_model: var_or("FITPLAN_TEXT_MODEL", gemini::DEFAULT_TEXT_MODEL),
                image_model: var_or("FITPLAN_IMAGE_MODEL", gemini::DEFAULT_IMAGE_MODEL),
                temperature: var_or(
                    "FITPLAN_TEMPERATURE",
                    &gemini::DEFAULT_TEMPERATURE.to_string(),
                )
                .parse()
                .context("Invalid FITPLAN_TEMPERATURE value")?,
                max_output_tokens: var_or(
                    "FITPLAN_MAX_OUTPUT_TOKENS",
                    &gemini::DEFAULT_MAX_OUTPUT_TOKENS.to_string(),
                )
                .parse()
                .context("Invalid FITPLAN_MAX_OUTPUT_TOKENS value")?,
            },
            http: HttpConfig {
                port: var_or("FITPLAN_HTTP_PORT", &network::DEFAULT_HTTP_PORT.to_string())
                    .parse()
                    .context("Invalid FITPLAN_HTTP_PORT value")?,
                timeout_secs: var_or(
                    "FITPLAN_HTTP_TIMEOUT_SECS",
                    &network::DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid FITPLAN_HTTP_TIMEOUT_SECS value")?,
            },
            data_dir,
            images,
        })
    }

    /// Log a configuration summary without credentials
    pub fn log_summary(&self) {
        info!(
            text_model = %self.gemini.text_model,
            image_model = %self.gemini.image_model,
            text_key_configured = self.gemini.api_key.is_some(),
            image_key_configured = self.gemini.image_credential().is_some(),
            http_port = self.http.port,
            data_dir = %self.data_dir.display(),
            "Configuration loaded"
        );
    }
}

/// Platform data directory with a `fitplan` subfolder
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fitplan")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.text_model, "gemini-flash-latest");
        assert_eq!(config.gemini.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.gemini.max_output_tokens, 2000);
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.http.timeout(), Duration::from_secs(60));
        assert!(config.data_dir.ends_with("fitplan"));
    }

    #[test]
    fn test_image_credential_falls_back_to_text_key() {
        let config = config_from(&[("GEMINI_API_KEY", "text-key")]).unwrap();
        assert_eq!(config.gemini.image_credential(), Some("text-key"));

        let config = config_from(&[("GEMINI_API_KEY", "text-key"), ("GEMINI_IMAGE_API_KEY", "img")])
            .unwrap();
        assert_eq!(config.gemini.image_credential(), Some("img"));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = config_from(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = config_from(&[("FITPLAN_HTTP_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("FITPLAN_HTTP_PORT"));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = config_from(&[("GEMINI_API_KEY", "super-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
