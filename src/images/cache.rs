// ABOUTME: Append-only concurrent cache of resolved image outcomes
// ABOUTME: Keyed by category and subject name; the first stored outcome wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use dashmap::DashMap;

use super::{ImageCategory, ImageOutcome};

/// Concurrent image cache
///
/// Entries are never replaced or evicted. When two requests for the same key
/// race, the outcome stored first is kept and returned to both.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: DashMap<(ImageCategory, String), ImageOutcome>,
}

impl ImageCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(category: ImageCategory, subject: &str) -> (ImageCategory, String) {
        (category, subject.trim().to_lowercase())
    }

    /// Cached outcome for a subject
    #[must_use]
    pub fn get(&self, category: ImageCategory, subject: &str) -> Option<ImageOutcome> {
        self.entries
            .get(&Self::key(category, subject))
            .map(|entry| entry.value().clone())
    }

    /// Store an outcome unless one already exists; returns the stored one
    pub fn insert(
        &self,
        category: ImageCategory,
        subject: &str,
        outcome: ImageOutcome,
    ) -> ImageOutcome {
        self.entries
            .entry(Self::key(category, subject))
            .or_insert(outcome)
            .value()
            .clone()
    }

    /// Number of cached outcomes
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::{ImageReference, ImageSource};

    fn fallback(url: &str) -> ImageOutcome {
        ImageOutcome {
            reference: ImageReference::Remote(url.to_owned()),
            note: Some("Used fallback image provider because Gemini key is missing.".to_owned()),
            source: ImageSource::Fallback,
        }
    }

    #[test]
    fn test_first_write_wins() {
        let cache = ImageCache::new();
        let first = fallback("https://a");

        assert_eq!(cache.insert(ImageCategory::Food, "Oats", first.clone()), first);
        assert_eq!(cache.insert(ImageCategory::Food, "oats ", fallback("https://b")), first);
        assert_eq!(cache.get(ImageCategory::Food, "OATS"), Some(first));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_categories_are_separate_keys() {
        let cache = ImageCache::new();
        cache.insert(ImageCategory::Food, "Plank", fallback("https://food"));
        assert!(cache.get(ImageCategory::Exercise, "Plank").is_none());
    }
}
