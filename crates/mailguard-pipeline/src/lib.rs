//! MailGuard Decision Pipeline
//!
//! The multi-stage spam decision logic: document-level classification with
//! a trust-pattern override, independent sentence-level re-scoring at a
//! stricter threshold, a confidence-gated downgrade of uncorroborated spam
//! verdicts, and best-effort explanation.
//!
//! The pipeline owns no models. Classifier and explainer instances are
//! injected at construction, built once by the process entry point, and
//! shared read-only across requests.

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::PipelineConfig;
pub use pipeline::DecisionPipeline;
pub use report::{AnalysisReport, SuspiciousSentence};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::PipelineConfig;
    pub use crate::pipeline::DecisionPipeline;
    pub use crate::report::{AnalysisReport, SuspiciousSentence};
}
