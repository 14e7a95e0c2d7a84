// ABOUTME: Low-level extractors that pull named JSON fragments out of noisy model text
// ABOUTME: Balanced-bracket block scanning and quoted scalar field recovery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fragment Extractors
//!
//! Neither extractor validates that what it returns is well-formed JSON; the
//! recovery engine parses each fragment and records the outcome.

use regex::Regex;

/// Delimiter pair enclosing a structured JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiters {
    /// `{` ... `}`
    Object,
    /// `[` ... `]`
    Array,
}

impl Delimiters {
    const fn open(self) -> u8 {
        match self {
            Self::Object => b'{',
            Self::Array => b'[',
        }
    }

    const fn close(self) -> u8 {
        match self {
            Self::Object => b'}',
            Self::Array => b']',
        }
    }
}

/// Extract the balanced `{...}` or `[...]` block that follows `"field"` in `source`
///
/// Finds the first occurrence of the quoted field name, then the first opening
/// delimiter after it, and scans forward with a depth counter until the
/// matching close. The returned slice includes both delimiters. Delimiters
/// inside string literals, including after escaped quotes, are skipped.
///
/// Returns `None` when the field name is absent, no opening delimiter follows
/// it, or the structure is unterminated.
#[must_use]
pub fn extract_bracket_block<'a>(
    source: &'a str,
    field: &str,
    delimiters: Delimiters,
) -> Option<&'a str> {
    let field_index = source.find(&quoted(field))?;
    let open_index = field_index + source[field_index..].find(char::from(delimiters.open()))?;

    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, &byte) in source.as_bytes()[open_index..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
        } else if byte == b'"' {
            in_string = true;
        } else if byte == delimiters.open() {
            depth += 1;
        } else if byte == delimiters.close() {
            depth -= 1;
            if depth == 0 {
                return Some(&source[open_index..=open_index + offset]);
            }
        }
    }
    None
}

/// Extract the string value of `"field": "value"` from `source`
///
/// Escaped quotes inside the value are not understood: the capture stops at
/// the first `"` after the opening quote.
#[must_use]
pub fn extract_string_field(source: &str, field: &str) -> Option<String> {
    let pattern = format!(r#""{}"\s*:\s*"([^"]*)""#, regex::escape(field));
    let regex = Regex::new(&pattern).ok()?;
    regex
        .captures(source)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().to_owned())
}

/// Whether `source` mentions the quoted field name at all
#[must_use]
pub fn mentions_field(source: &str, field: &str) -> bool {
    source.contains(&quoted(field))
}

fn quoted(field: &str) -> String {
    format!("\"{field}\"")
}
