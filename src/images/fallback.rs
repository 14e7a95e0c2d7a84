// ABOUTME: Deterministic fallback image URLs built from sanitized prompts
// ABOUTME: Strips punctuation and percent-encodes the prompt into a path segment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Reduce a prompt to ASCII letters, digits and whitespace
///
/// Parentheses and commas are removed first, then every other character
/// outside that set, then the result is trimmed. Inner whitespace is kept.
#[must_use]
pub fn sanitize_prompt(prompt: &str) -> String {
    prompt
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ','))
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Build the fallback provider URL for a prompt
///
/// The sanitized prompt is percent-encoded and appended to `base_url` as a
/// single path segment.
#[must_use]
pub fn build_fallback_url(base_url: &str, prompt: &str) -> String {
    let sanitized = sanitize_prompt(prompt);
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&sanitized)
    )
}
