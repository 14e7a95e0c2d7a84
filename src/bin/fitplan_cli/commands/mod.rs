// ABOUTME: Re-exports command modules for fitplan-cli
// ABOUTME: Provides access to plan and image commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod image;
pub mod plan;
