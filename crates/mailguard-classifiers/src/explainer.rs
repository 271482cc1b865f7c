//! Explainer trait and shared helpers

use async_trait::async_trait;
use mailguard_core::Result;
use std::collections::HashSet;

/// Minimum input length for which an explanation is attempted; anything
/// shorter yields an empty word list.
pub const MIN_EXPLAIN_CHARS: usize = 10;

/// Trait for explanation strategies
///
/// Given text, produce an ordered list of words that make it look
/// suspicious. Implementations are deterministic, produce no duplicates,
/// and return an empty list for empty or too-short input.
#[async_trait]
pub trait Explainer: Send + Sync {
    /// Explain why the text looks suspicious
    async fn explain(&self, text: &str) -> Result<Vec<String>>;

    /// Get the explainer name
    fn name(&self) -> &str;
}

/// Drop duplicate words, keeping the first occurrence of each
pub fn dedup_first_seen(words: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .filter(|w| seen.insert(w.clone()))
        .collect()
}
