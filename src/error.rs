use thiserror::Error;

/// Unified error type for ghc operations
#[derive(Error, Debug)]
pub enum GhcError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration missing: {0}")]
    ConfigMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Command timed out after {seconds}s: {command}")]
    Timeout { command: String, seconds: u64 },

    #[error("Pre-build hook failed: {0}")]
    Hook(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in ghc
pub type Result<T> = std::result::Result<T, GhcError>;

impl GhcError {
    /// Create a missing-configuration error with context
    pub fn config_missing(msg: impl Into<String>) -> Self {
        GhcError::ConfigMissing(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GhcError::Config(msg.into())
    }

    /// Create an invalid-input error with context
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        GhcError::InvalidInput(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        GhcError::Repository(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GhcError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        GhcError::Remote(msg.into())
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        GhcError::Hook(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        GhcError::Command(msg.into())
    }
}
