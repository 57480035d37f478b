use thiserror::Error;

/// Unified error type for query-tags operations
#[derive(Error, Debug)]
pub enum QueryTagsError {
    #[error("Unknown option {0}")]
    UnknownOption(String),

    #[error("No hashes or patterns are provided")]
    NoInput,

    #[error("{0}")]
    Usage(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitHub query failed: {0}")]
    Upstream(String),

    #[error("jq stage failed: {0}")]
    Jq(String),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in query-tags
pub type Result<T> = std::result::Result<T, QueryTagsError>;

impl QueryTagsError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        QueryTagsError::Config(msg.into())
    }

    /// Create an upstream (gh) error with context
    pub fn upstream(msg: impl Into<String>) -> Self {
        QueryTagsError::Upstream(msg.into())
    }

    /// Create a jq stage error with context
    pub fn jq(msg: impl Into<String>) -> Self {
        QueryTagsError::Jq(msg.into())
    }

    /// Usage errors are reported before any network call is made.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            QueryTagsError::UnknownOption(_)
                | QueryTagsError::NoInput
                | QueryTagsError::Usage(_)
                | QueryTagsError::InvalidPattern { .. }
        )
    }
}
