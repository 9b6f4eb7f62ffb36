//! Version-control abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! that branch-start transitions need, allowing for a real implementation
//! backed by the `git2` crate and a mock implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [VersionControl] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Backend]: A real implementation using the `git2` crate
//! - [mock::MockGit]: A mock implementation for testing
//!
//! Most code should depend on the [VersionControl] trait rather than
//! concrete implementations; the orchestrator in particular only ever sees
//! `&dyn VersionControl`.

pub mod mock;
pub mod repository;

pub use mock::MockGit;
pub use repository::Git2Backend;

use crate::error::Result;

/// Common version-control operation trait for abstraction
///
/// All implementors must be `Send + Sync` to allow safe sharing across
/// threads. Methods return [crate::error::Result<T>]; implementations map
/// underlying errors (like `git2::Error`) to the appropriate
/// [crate::error::GitFlowError] variants.
pub trait VersionControl: Send + Sync {
    /// List local branches whose names start with `prefix`, in the
    /// backend's natural enumeration order.
    ///
    /// Returns an empty vector (never an error) when nothing matches.
    fn list_branches(&self, prefix: &str) -> Result<Vec<String>>;

    /// Whether the working tree has uncommitted changes to tracked files
    /// (staged or unstaged).
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// Check out an existing local branch.
    fn checkout(&self, branch_name: &str) -> Result<()>;

    /// Create a new branch from `from_branch` and check it out.
    ///
    /// Equivalent to `git checkout -b <new_name> <from_branch>`.
    fn create_branch(&self, new_name: &str, from_branch: &str) -> Result<()>;

    /// Commit all tracked changes with the given message.
    ///
    /// Equivalent to `git commit -a -m <message>`.
    fn commit_all(&self, message: &str) -> Result<()>;

    /// Whether a local branch with exactly this name exists.
    ///
    /// This is an exact-name check: `hotfix/1.0` must not match
    /// `hotfix/1.0.1`.
    fn branch_exists(&self, branch_name: &str) -> Result<bool>;

    /// Name of the currently checked-out branch.
    fn current_branch(&self) -> Result<String>;
}
