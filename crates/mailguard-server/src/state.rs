//! Shared application state and component wiring

use crate::config::{ClassifierSettings, ExplainerSettings, ServerConfig};
use mailguard_classifiers::{
    AttributionExplainer, Classifier, Explainer, KeywordExplainer, LexiconClassifier,
    RemoteAttributionSource, RemoteClassifier, TrustFilter,
};
use mailguard_core::Result;
use mailguard_pipeline::DecisionPipeline;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::info;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    /// The decision pipeline, constructed once and reused across requests
    pub pipeline: Arc<DecisionPipeline>,

    /// Handle for rendering Prometheus metrics
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Build all components from configuration
    pub fn from_config(config: &ServerConfig, metrics: PrometheusHandle) -> Result<Self> {
        let classifier = build_classifier(&config.classifier)?;
        let explainer = build_explainer(&config.explainer);
        let trust = TrustFilter::with_patterns(&config.trust_patterns)?;

        info!(
            classifier = classifier.name(),
            explainer = explainer.name(),
            "analysis components initialized"
        );

        let pipeline =
            DecisionPipeline::new(classifier, explainer, trust, config.pipeline.clone());

        Ok(Self {
            pipeline: Arc::new(pipeline),
            metrics,
        })
    }
}

fn build_classifier(settings: &ClassifierSettings) -> Result<Arc<dyn Classifier>> {
    let classifier: Arc<dyn Classifier> = match settings {
        ClassifierSettings::Lexicon => Arc::new(LexiconClassifier::new()?),
        ClassifierSettings::Remote(remote) => Arc::new(RemoteClassifier::new(remote.clone())),
    };
    Ok(classifier)
}

fn build_explainer(settings: &ExplainerSettings) -> Arc<dyn Explainer> {
    match settings {
        ExplainerSettings::Keyword => Arc::new(KeywordExplainer::new()),
        ExplainerSettings::Attribution { endpoint } => Arc::new(AttributionExplainer::new(
            Arc::new(RemoteAttributionSource::new(endpoint.clone())),
        )),
    }
}
