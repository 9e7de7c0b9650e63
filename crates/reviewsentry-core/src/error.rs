//! Error types for ReviewSentry

/// Result type alias using ReviewSentry's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ReviewSentry operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid configuration (empty credentials, bad config file)
    #[error("configuration error: {0}")]
    Config(String),

    /// Oracle call failed after exhausting retries
    #[error("oracle error: {0}")]
    Oracle(String),

    /// Oracle returned a payload that does not match the required shape
    #[error("oracle parse error: {0}")]
    Parse(String),

    /// Email delivery failed after exhausting retries
    #[error("delivery error: {0}")]
    Delivery(String),

    /// Report read failure (missing or malformed input file)
    #[error("report read error: {0}")]
    Read(String),

    /// Report write failure
    #[error("report write error: {0}")]
    Write(String),

    /// Review source URL is missing the id path segment
    #[error("malformed review url: {0}")]
    ReviewUrl(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new oracle error
    pub fn oracle(msg: impl Into<String>) -> Self {
        Self::Oracle(msg.into())
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new delivery error
    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }

    /// Create a new report read error
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Create a new report write error
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Whether this error originated in the classification oracle.
    ///
    /// Parse failures count: a payload that does not fit the required shape
    /// aborts the run exactly like an unreachable oracle.
    pub fn is_oracle(&self) -> bool {
        matches!(self, Self::Oracle(_) | Self::Parse(_))
    }
}
