//! Error types for MailGuard

/// Result type alias using MailGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for MailGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input empty or below the minimum analyzable length
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Explainer execution errors
    #[error("explainer error: {0}")]
    Explainer(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Classifier call exceeded its latency budget
    #[error("classifier call timed out")]
    Timeout,

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new explainer error
    pub fn explainer(msg: impl Into<String>) -> Self {
        Self::Explainer(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error is the caller's fault (4xx-equivalent) rather
    /// than an analysis failure (5xx-equivalent)
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
