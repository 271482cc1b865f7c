//! Server configuration

use mailguard_classifiers::RemoteClassifierConfig;
use mailguard_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Classification backend
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Explanation backend
    #[serde(default)]
    pub explainer: ExplainerSettings,

    /// Extra trust patterns on top of the built-in set
    #[serde(default)]
    pub trust_patterns: Vec<String>,

    /// Decision pipeline thresholds
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl ServerConfig {
    /// Load configuration from file, or use defaults when the file does
    /// not exist
    pub fn load(config_path: &str) -> anyhow::Result<Self> {
        let config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        Ok(config)
    }
}

/// Which classification backend to run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClassifierSettings {
    /// Phrase-matching fallback, no network required
    #[default]
    Lexicon,

    /// Hosted text-classification endpoint
    Remote(RemoteClassifierConfig),
}

/// Which explanation backend to run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExplainerSettings {
    /// Static suspicion lexicon, no network required
    #[default]
    Keyword,

    /// Hosted token-attribution endpoint
    Attribution { endpoint: String },
}
