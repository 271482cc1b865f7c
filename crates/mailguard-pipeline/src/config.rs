//! Pipeline configuration

use serde::{Deserialize, Serialize};

/// Decision pipeline thresholds
///
/// The sentence-level spam threshold is intentionally stricter than the
/// document-level cutoff: a sentence is only retained as corroborating
/// evidence when the classifier is highly confident, which keeps the
/// downgrade rule meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum input length after whitespace collapsing, in characters
    #[serde(default = "default_min_input_chars")]
    pub min_input_chars: usize,

    /// Sentences at or below this length are not re-scored
    #[serde(default = "default_min_sentence_chars")]
    pub min_sentence_chars: usize,

    /// A sentence counts as suspicious only above this confidence
    #[serde(default = "default_sentence_spam_threshold")]
    pub sentence_spam_threshold: f32,

    /// Latency budget per classifier call, in milliseconds
    #[serde(default = "default_classifier_timeout_ms")]
    pub classifier_timeout_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_input_chars: default_min_input_chars(),
            min_sentence_chars: default_min_sentence_chars(),
            sentence_spam_threshold: default_sentence_spam_threshold(),
            classifier_timeout_ms: default_classifier_timeout_ms(),
        }
    }
}

fn default_min_input_chars() -> usize {
    10
}

fn default_min_sentence_chars() -> usize {
    15
}

fn default_sentence_spam_threshold() -> f32 {
    0.90
}

fn default_classifier_timeout_ms() -> u64 {
    10_000
}
