//! MailGuard Server
//!
//! HTTP API exposing the spam analysis pipeline. Classifier and explainer
//! backends are selected by configuration, constructed once at startup,
//! and shared read-only across requests.

pub mod config;
pub mod routes;
pub mod state;

pub use config::{ClassifierSettings, ExplainerSettings, ServerConfig};
pub use routes::create_router;
pub use state::AppState;
