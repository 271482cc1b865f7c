//! Classifier trait and verdict types

use async_trait::async_trait;
use mailguard_core::Result;
use serde::{Deserialize, Serialize};

/// Binary spam classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpamLabel {
    /// Unwanted or malicious mail
    Spam,
    /// Legitimate mail
    Safe,
}

impl SpamLabel {
    /// Get the wire-format label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "SPAM",
            Self::Safe => "SAFE",
        }
    }
}

impl std::fmt::Display for SpamLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a text span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Predicted label
    pub label: SpamLabel,

    /// Probability the classifier assigns to the predicted label (0.0-1.0)
    pub confidence: f32,
}

impl Verdict {
    /// Create a spam verdict
    pub fn spam(confidence: f32) -> Self {
        Self {
            label: SpamLabel::Spam,
            confidence,
        }
    }

    /// Create a safe verdict
    pub fn safe(confidence: f32) -> Self {
        Self {
            label: SpamLabel::Safe,
            confidence,
        }
    }

    /// Whether the predicted label is spam
    pub fn is_spam(&self) -> bool {
        self.label == SpamLabel::Spam
    }

    /// Check if confidence exceeds a threshold
    pub fn exceeds(&self, threshold: f32) -> bool {
        self.confidence > threshold
    }
}

/// Trait for all spam classifiers
///
/// Implementations must tolerate arbitrary UTF-8 input of any length and be
/// safe for concurrent read-only use; each call is independent and
/// stateless.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given text span
    async fn classify(&self, text: &str) -> Result<Verdict>;

    /// Get the classifier name
    fn name(&self) -> &str;
}
