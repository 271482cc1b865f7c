//! Hosted text-classification backend
//!
//! Delegates inference to a pretrained model served over HTTP. The backend
//! contract: `POST {endpoint}` with `{"model": <name>, "inputs": <text>}`
//! returns the full score distribution as a JSON array of
//! `{"label": <string>, "score": <float>}` entries.
//!
//! Which returned label means "spam" varies by model, so the mapping is an
//! explicit part of the configuration (`spam_label` / `safe_label`) and is
//! never inferred from array position. A response naming neither configured
//! label is an error.

use crate::classifier::{Classifier, Verdict};
use mailguard_core::{text::truncate_span, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_spam_label() -> String {
    "LABEL_1".to_string()
}

fn default_safe_label() -> String {
    "LABEL_0".to_string()
}

fn default_max_span_chars() -> usize {
    512
}

/// Configuration for a hosted classification backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteClassifierConfig {
    /// Inference endpoint URL
    pub endpoint: String,

    /// Model identifier sent with each request
    pub model: String,

    /// Backend label name meaning spam
    #[serde(default = "default_spam_label")]
    pub spam_label: String,

    /// Backend label name meaning safe
    #[serde(default = "default_safe_label")]
    pub safe_label: String,

    /// Maximum span length sent to the backend, in characters
    #[serde(default = "default_max_span_chars")]
    pub max_span_chars: usize,
}

/// One entry of the backend's score distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    model: &'a str,
    inputs: &'a str,
}

pub struct RemoteClassifier {
    name: String,
    client: reqwest::Client,
    config: RemoteClassifierConfig,
}

impl RemoteClassifier {
    pub fn new(config: RemoteClassifierConfig) -> Self {
        Self {
            name: format!("remote:{}", config.model),
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Map a backend score distribution to a verdict via the configured
    /// label names.
    fn verdict_from_scores(&self, scores: &[LabelScore]) -> Result<Verdict> {
        let spam = scores
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case(&self.config.spam_label));
        let safe = scores
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case(&self.config.safe_label));

        let spam_score = spam.map(|s| s.score).ok_or_else(|| {
            Error::classifier(format!(
                "backend response does not name configured spam label '{}'",
                self.config.spam_label
            ))
        })?;

        let verdict = if spam_score > 0.5 {
            Verdict::spam(spam_score)
        } else {
            let safe_score = safe.map(|s| s.score).unwrap_or(1.0 - spam_score);
            Verdict::safe(safe_score)
        };

        Ok(verdict)
    }
}

#[async_trait::async_trait]
impl Classifier for RemoteClassifier {
    async fn classify(&self, text: &str) -> Result<Verdict> {
        let span = truncate_span(text, self.config.max_span_chars);
        if span.trim().is_empty() {
            return Ok(Verdict::safe(0.0));
        }

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&InferenceRequest {
                model: &self.config.model,
                inputs: span,
            })
            .send()
            .await
            .map_err(|e| Error::classifier(format!("inference request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::classifier(format!(
                "inference backend returned {}",
                response.status()
            )));
        }

        let scores: Vec<LabelScore> = response
            .json()
            .await
            .map_err(|e| Error::classifier(format!("malformed inference response: {e}")))?;

        debug!(model = %self.config.model, scores = scores.len(), "backend scores received");

        self.verdict_from_scores(&scores)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
