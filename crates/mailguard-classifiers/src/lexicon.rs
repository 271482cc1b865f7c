//! Lexicon-based spam classifier
//!
//! This is a phrase-matching classifier used when no hosted inference
//! backend is configured. Confidence is bounded for the lexicon-only
//! approach.

use crate::classifier::{Classifier, Verdict};
use aho_corasick::AhoCorasick;
use mailguard_core::Result;
use std::collections::HashSet;

/// Phrases that commonly appear in spam and phishing mail
const SPAM_PHRASES: &[&str] = &[
    "urgent",
    "verify",
    "click here",
    "suspended",
    "account",
    "locked",
    "winner",
    "won a",
    "prize",
    "immediately",
    "gift card",
    "confirm",
    "limited time",
    "act now",
    "password",
    "claim",
    "congratulations",
    "wire transfer",
    "lottery",
    "free money",
];

pub struct LexiconClassifier {
    name: String,
    phrases: AhoCorasick,
}

impl LexiconClassifier {
    pub fn new() -> Result<Self> {
        Self::with_name("spam-lexicon")
    }

    pub fn with_name(name: impl Into<String>) -> Result<Self> {
        let phrases = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(SPAM_PHRASES)
            .map_err(|e| {
                mailguard_core::Error::classifier(format!(
                    "Failed to build spam phrase matcher: {e}"
                ))
            })?;

        Ok(Self {
            name: name.into(),
            phrases,
        })
    }

    fn score(&self, text: &str) -> f32 {
        // Count distinct phrases present; repeating one phrase does not
        // raise the score.
        let hits: HashSet<usize> = self
            .phrases
            .find_iter(text)
            .map(|m| m.pattern().as_usize())
            .collect();

        (hits.len() as f32 * 0.35).clamp(0.0, 0.98)
    }
}

#[async_trait::async_trait]
impl Classifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<Verdict> {
        if text.trim().is_empty() {
            return Ok(Verdict::safe(0.0));
        }

        let score = self.score(text);
        let verdict = if score > 0.5 {
            Verdict::spam(score)
        } else {
            Verdict::safe(1.0 - score)
        };

        Ok(verdict)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
