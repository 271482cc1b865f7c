//! Assembled analysis results

use mailguard_classifiers::Verdict;
use serde::{Deserialize, Serialize};

/// A sentence retained as corroborating spam evidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspiciousSentence {
    /// The sentence text, as produced by the splitter
    pub text: String,

    /// Classifier confidence for the spam label on this sentence
    pub confidence: f32,
}

/// Complete result of analyzing one email
///
/// `suspicious_sentences` is always a subset of the sentences split from
/// the normalized input, in original appearance order. After the downgrade
/// rule, a spam overall verdict implies at least one suspicious sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Final document-level verdict
    pub overall: Verdict,

    /// Sentences that independently scored as high-confidence spam
    pub suspicious_sentences: Vec<SuspiciousSentence>,

    /// Words that make the text look suspicious, deduplicated and capped
    pub highlighted_words: Vec<String>,

    /// Whether a trust pattern forced the safe verdict
    pub trusted: bool,

    /// Whether the downgrade rule reversed a spam verdict
    pub downgraded: bool,
}
