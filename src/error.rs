use thiserror::Error;

/// Unified error type for git-flow operations
#[derive(Error, Debug)]
pub enum GitFlowError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Working tree has uncommitted changes. Commit or stash them first.")]
    DirtyWorkingTree,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Branch conflict: {0}")]
    Conflict(String),

    #[error("Build tool error: {0}")]
    Build(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-flow
pub type Result<T> = std::result::Result<T, GitFlowError>;

impl GitFlowError {
    /// Create a validation error with context
    pub fn validation(msg: impl Into<String>) -> Self {
        GitFlowError::Validation(msg.into())
    }

    /// Create a conflict error with context
    pub fn conflict(msg: impl Into<String>) -> Self {
        GitFlowError::Conflict(msg.into())
    }

    /// Create a build tool error with context
    pub fn build(msg: impl Into<String>) -> Self {
        GitFlowError::Build(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitFlowError::Config(msg.into())
    }
}
