//! The multi-stage spam decision pipeline

use crate::config::PipelineConfig;
use crate::report::{AnalysisReport, SuspiciousSentence};
use mailguard_classifiers::{Classifier, Explainer, SpamLabel, TrustFilter, Verdict};
use mailguard_core::text::{normalize_whitespace, split_sentences};
use mailguard_core::{Error, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Confidence reported when a trust pattern forces the safe verdict
const TRUSTED_CONFIDENCE: f32 = 0.01;

/// Orchestrates document classification, trust override, sentence
/// re-scoring, verdict downgrade, and explanation for one email at a time.
///
/// Classifier calls run sequentially; there is no shared mutable state, so
/// one pipeline instance serves concurrent requests.
pub struct DecisionPipeline {
    classifier: Arc<dyn Classifier>,
    explainer: Arc<dyn Explainer>,
    trust: TrustFilter,
    config: PipelineConfig,
}

impl DecisionPipeline {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        explainer: Arc<dyn Explainer>,
        trust: TrustFilter,
        config: PipelineConfig,
    ) -> Self {
        Self {
            classifier,
            explainer,
            trust,
            config,
        }
    }

    /// Analyze one email body
    pub async fn analyze(&self, raw_text: &str) -> Result<AnalysisReport> {
        let start = Instant::now();
        metrics::counter!("mailguard_requests_total").increment(1);

        let text = normalize_whitespace(raw_text);
        if text.chars().count() < self.config.min_input_chars {
            return Err(Error::invalid_input(format!(
                "text must be at least {} characters after whitespace collapsing",
                self.config.min_input_chars
            )));
        }

        let trusted = self.trust.is_trusted(&text);
        let mut overall = if trusted {
            debug!("trust pattern matched, skipping document classification");
            metrics::counter!("mailguard_trust_overrides_total").increment(1);
            Verdict::safe(TRUSTED_CONFIDENCE)
        } else {
            self.classify_span(&text).await?
        };

        let sentences = split_sentences(&text);
        let mut suspicious_sentences = Vec::new();
        for sentence in &sentences {
            if sentence.chars().count() <= self.config.min_sentence_chars {
                continue;
            }
            let verdict = self.classify_span(sentence).await?;
            if verdict.is_spam() && verdict.exceeds(self.config.sentence_spam_threshold) {
                debug!(confidence = verdict.confidence, "sentence flagged as suspicious");
                suspicious_sentences.push(SuspiciousSentence {
                    text: (*sentence).to_string(),
                    confidence: verdict.confidence,
                });
            }
        }

        // A spam verdict with no corroborating sentence is treated as a
        // false positive driven by overall tone.
        let mut downgraded = false;
        if overall.is_spam() && suspicious_sentences.is_empty() {
            info!(
                confidence = overall.confidence,
                "spam verdict lacks sentence-level corroboration, downgrading to safe"
            );
            metrics::counter!("mailguard_downgrades_total").increment(1);
            overall.label = SpamLabel::Safe;
            downgraded = true;
        }

        // Explanation is best-effort; classification is not.
        let highlighted_words = match self.explainer.explain(&text).await {
            Ok(words) => words,
            Err(e) => {
                warn!(
                    explainer = self.explainer.name(),
                    error = %e,
                    "explainer failed, returning empty highlights"
                );
                Vec::new()
            }
        };

        metrics::counter!("mailguard_verdicts_total", "label" => overall.label.as_str())
            .increment(1);
        metrics::histogram!("mailguard_analysis_latency_us")
            .record(start.elapsed().as_micros() as f64);

        Ok(AnalysisReport {
            overall,
            suspicious_sentences,
            highlighted_words,
            trusted,
            downgraded,
        })
    }

    /// Classify one span within the configured latency budget
    async fn classify_span(&self, span: &str) -> Result<Verdict> {
        let budget = Duration::from_millis(self.config.classifier_timeout_ms);
        tokio::time::timeout(budget, self.classifier.classify(span))
            .await
            .map_err(|_| Error::Timeout)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    // Flags spans containing the phrase "claim your prize" with high
    // confidence and "vaguely promotional" with low confidence.
    struct MarkerClassifier;

    #[async_trait::async_trait]
    impl Classifier for MarkerClassifier {
        async fn classify(&self, text: &str) -> Result<Verdict> {
            let lowered = text.to_lowercase();
            let verdict = if lowered.contains("claim your prize") {
                Verdict::spam(0.97)
            } else if lowered.contains("vaguely promotional") {
                Verdict::spam(0.6)
            } else {
                Verdict::safe(0.95)
            };
            Ok(verdict)
        }

        fn name(&self) -> &str {
            "marker"
        }
    }

    struct FixedClassifier(Verdict);

    #[async_trait::async_trait]
    impl Classifier for FixedClassifier {
        async fn classify(&self, _text: &str) -> Result<Verdict> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct CountingClassifier {
        calls: AtomicU32,
    }

    impl CountingClassifier {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl Classifier for CountingClassifier {
        async fn classify(&self, _text: &str) -> Result<Verdict> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(Verdict::safe(0.8))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct FailingClassifier;

    #[async_trait::async_trait]
    impl Classifier for FailingClassifier {
        async fn classify(&self, _text: &str) -> Result<Verdict> {
            Err(Error::classifier("backend unreachable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct SlowClassifier(Duration);

    #[async_trait::async_trait]
    impl Classifier for SlowClassifier {
        async fn classify(&self, _text: &str) -> Result<Verdict> {
            tokio::time::sleep(self.0).await;
            Ok(Verdict::safe(0.9))
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct FixedExplainer(Vec<&'static str>);

    #[async_trait::async_trait]
    impl Explainer for FixedExplainer {
        async fn explain(&self, _text: &str) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|w| (*w).to_string()).collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingExplainer;

    #[async_trait::async_trait]
    impl Explainer for FailingExplainer {
        async fn explain(&self, _text: &str) -> Result<Vec<String>> {
            Err(Error::explainer("attribution backend unreachable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn pipeline_with(
        classifier: Arc<dyn Classifier>,
        explainer: Arc<dyn Explainer>,
    ) -> DecisionPipeline {
        DecisionPipeline::new(
            classifier,
            explainer,
            TrustFilter::new().unwrap(),
            PipelineConfig::default(),
        )
    }

    #[tokio::test]
    async fn too_short_input_is_invalid() {
        let pipeline = pipeline_with(Arc::new(MarkerClassifier), Arc::new(FixedExplainer(vec![])));
        let err = pipeline.analyze("hi").await.unwrap_err();
        assert!(err.is_user_error());
    }

    #[tokio::test]
    async fn length_check_runs_after_whitespace_collapsing() {
        let pipeline = pipeline_with(Arc::new(MarkerClassifier), Arc::new(FixedExplainer(vec![])));
        // 14 raw characters, but only 3 after collapsing
        let err = pipeline.analyze("a      \n\t  b  ").await.unwrap_err();
        assert!(err.is_user_error());
    }

    #[tokio::test]
    async fn trusted_text_is_safe_regardless_of_classifier() {
        let pipeline = pipeline_with(
            Arc::new(FixedClassifier(Verdict::spam(0.99))),
            Arc::new(FixedExplainer(vec![])),
        );
        let report = pipeline
            .analyze("Google LLC, 1600 Amphitheatre Parkway, Mountain View")
            .await
            .unwrap();

        assert!(report.trusted);
        assert_eq!(report.overall.label, SpamLabel::Safe);
        assert!((report.overall.confidence - 0.01).abs() < 1e-6);
        // The sentence classifier still flags sentences, the overall
        // verdict stays safe anyway
        assert!(!report.suspicious_sentences.is_empty());
    }

    #[tokio::test]
    async fn trusted_text_skips_document_classification() {
        let classifier = CountingClassifier::new();
        let pipeline = pipeline_with(classifier.clone(), Arc::new(FixedExplainer(vec![])));
        pipeline
            .analyze("Google LLC sent this account notice today.")
            .await
            .unwrap();

        // One sentence above the minimum length, no document-level call
        assert_eq!(classifier.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn uncorroborated_spam_is_downgraded_to_safe() {
        let pipeline = pipeline_with(Arc::new(MarkerClassifier), Arc::new(FixedExplainer(vec![])));
        let report = pipeline
            .analyze("This vaguely promotional message greets you. Nothing else here worth seeing.")
            .await
            .unwrap();

        assert!(report.downgraded);
        assert_eq!(report.overall.label, SpamLabel::Safe);
        assert!(report.suspicious_sentences.is_empty());
    }

    #[tokio::test]
    async fn corroborated_spam_stays_spam() {
        let pipeline = pipeline_with(Arc::new(MarkerClassifier), Arc::new(FixedExplainer(vec![])));
        let report = pipeline
            .analyze("Act fast and claim your prize right away. Regular content follows in this message.")
            .await
            .unwrap();

        assert!(!report.downgraded);
        assert_eq!(report.overall.label, SpamLabel::Spam);
        assert_eq!(report.suspicious_sentences.len(), 1);
        assert_eq!(
            report.suspicious_sentences[0].text,
            "Act fast and claim your prize right away."
        );
        assert!(report.suspicious_sentences[0].confidence > 0.9);
    }

    #[tokio::test]
    async fn suspicious_sentences_keep_original_order() {
        let pipeline = pipeline_with(Arc::new(MarkerClassifier), Arc::new(FixedExplainer(vec![])));
        let input = "You must claim your prize today friend. A calm unrelated middle sentence sits here. Hurry and claim your prize before midnight.";
        let report = pipeline.analyze(input).await.unwrap();

        let flagged: Vec<&str> = report
            .suspicious_sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(
            flagged,
            vec![
                "You must claim your prize today friend.",
                "Hurry and claim your prize before midnight."
            ]
        );

        // Subset of the splitter's output for the same text
        let normalized = normalize_whitespace(input);
        let sentences = split_sentences(&normalized);
        for s in &report.suspicious_sentences {
            assert!(sentences.contains(&s.text.as_str()));
        }
    }

    #[tokio::test]
    async fn short_sentences_are_not_rescored() {
        let classifier = CountingClassifier::new();
        let pipeline = pipeline_with(classifier.clone(), Arc::new(FixedExplainer(vec![])));
        pipeline
            .analyze("Tiny one. Another bigger sentence sits here today.")
            .await
            .unwrap();

        // Document call plus one qualifying sentence; "Tiny one." is skipped
        assert_eq!(classifier.calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn classifier_failure_fails_the_analysis() {
        let pipeline = pipeline_with(Arc::new(FailingClassifier), Arc::new(FixedExplainer(vec![])));
        let err = pipeline
            .analyze("A perfectly ordinary message body.")
            .await
            .unwrap_err();
        assert!(!err.is_user_error());
    }

    #[tokio::test]
    async fn classifier_timeout_fails_the_analysis() {
        let config = PipelineConfig {
            classifier_timeout_ms: 50,
            ..PipelineConfig::default()
        };
        let pipeline = DecisionPipeline::new(
            Arc::new(SlowClassifier(Duration::from_millis(500))),
            Arc::new(FixedExplainer(vec![])),
            TrustFilter::new().unwrap(),
            config,
        );

        let err = pipeline
            .analyze("A perfectly ordinary message body.")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout));
    }

    #[tokio::test]
    async fn explainer_failure_degrades_to_empty_highlights() {
        let pipeline = pipeline_with(Arc::new(MarkerClassifier), Arc::new(FailingExplainer));
        let report = pipeline
            .analyze("A perfectly ordinary message body.")
            .await
            .unwrap();

        assert!(report.highlighted_words.is_empty());
        assert_eq!(report.overall.label, SpamLabel::Safe);
    }

    #[tokio::test]
    async fn explainer_words_are_passed_through() {
        let pipeline = pipeline_with(
            Arc::new(MarkerClassifier),
            Arc::new(FixedExplainer(vec!["verify", "urgent"])),
        );
        let report = pipeline
            .analyze("A perfectly ordinary message body.")
            .await
            .unwrap();

        assert_eq!(report.highlighted_words, vec!["verify", "urgent"]);
    }

    #[tokio::test]
    async fn spam_verdict_always_has_corroboration() {
        let pipeline = pipeline_with(Arc::new(MarkerClassifier), Arc::new(FixedExplainer(vec![])));
        for input in [
            "This vaguely promotional message greets you. Nothing else here worth seeing.",
            "Act fast and claim your prize right away. Regular content follows in this message.",
            "A perfectly ordinary message body.",
        ] {
            let report = pipeline.analyze(input).await.unwrap();
            assert!(
                !(report.overall.label == SpamLabel::Spam
                    && report.suspicious_sentences.is_empty()),
                "spam verdict without corroboration for {input:?}"
            );
        }
    }
}
