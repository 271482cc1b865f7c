//! Attribution-based explainer
//!
//! Consumes per-token importance scores from an attribution backend and
//! keeps the tokens that push the classification toward spam. Token text
//! arrives tokenizer-flavored (BPE `Ġ` prefixes, WordPiece `##` joiners,
//! `[CLS]`/`[SEP]` markers) and is cleaned before filtering.

use crate::explainer::{dedup_first_seen, Explainer, MIN_EXPLAIN_CHARS};
use mailguard_core::{text::truncate_span, Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Per-token contribution toward the spam class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenAttribution {
    pub token: String,
    pub importance: f32,
}

/// Trait for attribution backends
///
/// The production implementation calls a hosted explainer; tests substitute
/// scripted sources.
#[async_trait::async_trait]
pub trait AttributionSource: Send + Sync {
    /// Compute per-token importance scores for the given text
    async fn attribute(&self, text: &str) -> Result<Vec<TokenAttribution>>;

    /// Get the source name
    fn name(&self) -> &str;
}

#[derive(Serialize)]
struct AttributionRequest<'a> {
    inputs: &'a str,
}

/// Hosted attribution backend reached over HTTP
///
/// Contract: `POST {endpoint}` with `{"inputs": <text>}` returns a JSON
/// array of `{"token": <string>, "importance": <float>}` entries in token
/// order.
pub struct RemoteAttributionSource {
    name: String,
    client: reqwest::Client,
    endpoint: String,
    max_span_chars: usize,
}

impl RemoteAttributionSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            name: "remote-attribution".to_string(),
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            max_span_chars: 512,
        }
    }
}

#[async_trait::async_trait]
impl AttributionSource for RemoteAttributionSource {
    async fn attribute(&self, text: &str) -> Result<Vec<TokenAttribution>> {
        let span = truncate_span(text, self.max_span_chars);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AttributionRequest { inputs: span })
            .send()
            .await
            .map_err(|e| Error::explainer(format!("attribution request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::explainer(format!(
                "attribution backend returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::explainer(format!("malformed attribution response: {e}")))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Tokens never worth surfacing: tokenizer markers and filler words
const IGNORED_TOKENS: &[&str] = &["[cls]", "[sep]", "the", "and", "your"];

pub struct AttributionExplainer {
    name: String,
    source: Arc<dyn AttributionSource>,
    importance_threshold: f32,
    max_words: usize,
}

impl AttributionExplainer {
    pub fn new(source: Arc<dyn AttributionSource>) -> Self {
        Self {
            name: "attribution".to_string(),
            source,
            importance_threshold: 0.4,
            max_words: 10,
        }
    }

    /// Override the importance cutoff for surfacing a token
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.importance_threshold = threshold;
        self
    }

    /// Cap the number of returned words
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    fn clean_token(raw: &str) -> String {
        raw.trim().replace('Ġ', "").replace("##", "")
    }
}

#[async_trait::async_trait]
impl Explainer for AttributionExplainer {
    async fn explain(&self, text: &str) -> Result<Vec<String>> {
        if text.trim().chars().count() < MIN_EXPLAIN_CHARS {
            return Ok(Vec::new());
        }

        let attributions = self.source.attribute(text).await?;
        debug!(source = self.source.name(), tokens = attributions.len(), "attribution scores received");

        let mut kept = Vec::new();
        for attribution in attributions {
            if attribution.importance <= self.importance_threshold {
                continue;
            }
            let word = Self::clean_token(&attribution.token);
            if word.chars().count() <= 2 {
                continue;
            }
            if IGNORED_TOKENS.contains(&word.to_lowercase().as_str()) {
                continue;
            }
            kept.push(word);
        }

        Ok(dedup_first_seen(kept)
            .into_iter()
            .take(self.max_words)
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
