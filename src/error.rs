use thiserror::Error;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum GitReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Version error: {0}")]
    Version(String),

    /// The caller handed the core data that breaks one of its contracts.
    #[error("Internal invariant violated: {0}")]
    Invariant(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, GitReleaseError>;

impl GitReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitReleaseError::Version(msg.into())
    }

    /// Create an invariant violation error with context
    pub fn invariant(msg: impl Into<String>) -> Self {
        GitReleaseError::Invariant(msg.into())
    }

    /// True for errors caused by a defect in how the caller assembled its input
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, GitReleaseError::Invariant(_))
    }
}
