//! Keyword-based explainer
//!
//! The no-ML fallback: membership checks against a fixed suspicion lexicon.
//! Returned words follow lexicon order, so output is deterministic and
//! duplicate-free by construction.

use crate::explainer::{Explainer, MIN_EXPLAIN_CHARS};
use mailguard_core::Result;

/// Words and phrases that indicate pressure tactics or account-threat bait
const SUSPICION_KEYWORDS: &[&str] = &[
    "urgent",
    "verify",
    "click",
    "reward",
    "account",
    "locked",
    "won",
    "prize",
    "immediately",
    "suspended",
    "limited",
    "confirm",
    "gift card",
];

pub struct KeywordExplainer {
    name: String,
    max_words: usize,
}

impl KeywordExplainer {
    pub fn new() -> Self {
        Self {
            name: "keyword".to_string(),
            max_words: 12,
        }
    }

    /// Cap the number of returned words
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }
}

impl Default for KeywordExplainer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Explainer for KeywordExplainer {
    async fn explain(&self, text: &str) -> Result<Vec<String>> {
        if text.trim().chars().count() < MIN_EXPLAIN_CHARS {
            return Ok(Vec::new());
        }

        let lowered = text.to_lowercase();
        let matched = SUSPICION_KEYWORDS
            .iter()
            .filter(|k| lowered.contains(*k))
            .take(self.max_words)
            .map(|k| (*k).to_string())
            .collect();

        Ok(matched)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
