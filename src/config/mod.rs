// ABOUTME: Configuration management for the plan server, CLI and image chain
// ABOUTME: Environment loading plus the externalized image prompt settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: credentials, models, HTTP and storage settings
//! - **Images**: category phrasing, placeholders and the fallback endpoint

/// Environment and server configuration
pub mod environment;
/// Image fallback chain settings
pub mod images;

pub use environment::{load_dotenv, AppConfig, GeminiConfig, HttpConfig};
pub use images::ImageChainConfig;
