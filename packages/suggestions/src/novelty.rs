//! Gate that keeps near-duplicate suggestions out of storage.

use tracing::debug;

use crate::similarity::{best_match, normalize};

/// Decides whether a candidate description is worth keeping, given every
/// description already stored for the incident.
///
/// A candidate is rejected when it is too short to be actionable, exactly
/// matches an existing description after normalization, or scores at or above
/// the similarity ceiling against any existing description.
#[derive(Debug, Clone, PartialEq)]
pub struct NoveltyFilter {
    /// Minimum normalized character count for a description to qualify
    pub min_description_len: usize,
    /// Similarity score at or above which a candidate counts as a duplicate
    pub similarity_ceiling: f32,
}

impl Default for NoveltyFilter {
    fn default() -> Self {
        Self {
            min_description_len: 10,
            similarity_ceiling: 0.95,
        }
    }
}

impl NoveltyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_description_len(mut self, len: usize) -> Self {
        self.min_description_len = len;
        self
    }

    pub fn with_similarity_ceiling(mut self, ceiling: f32) -> Self {
        self.similarity_ceiling = ceiling;
        self
    }

    /// Returns true when `description` should be kept.
    pub fn is_novel(&self, description: &str, existing: &[String]) -> bool {
        let normalized = normalize(description);
        if normalized.chars().count() < self.min_description_len {
            debug!(
                len = normalized.chars().count(),
                "Rejecting suggestion: description too short"
            );
            return false;
        }

        let existing: Vec<String> = existing.iter().map(|d| normalize(d)).collect();
        if existing.iter().any(|d| *d == normalized) {
            debug!("Rejecting suggestion: exact duplicate of an existing description");
            return false;
        }

        if let Some((idx, score)) = best_match(&normalized, &existing) {
            if score >= self.similarity_ceiling {
                debug!(
                    score,
                    existing = %existing[idx],
                    "Rejecting suggestion: too similar to an existing description"
                );
                return false;
            }
        }

        true
    }
}
