//! Branch-lifecycle decision engine.
//!
//! Everything that decides *what* a branch-start transition does lives
//! here; the actual repository and build mutations go through the ports in
//! [crate::git] and [crate::build].

pub mod selector;
pub mod starter;

pub use starter::{BranchStarter, StartOptions, StartOutcome};

use crate::config::GitFlowConfig;
use crate::error::{GitFlowError, Result};
use crate::git::VersionControl;

/// The four git-flow branch categories a start transition can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Feature,
    Release,
    Hotfix,
    Support,
}

impl FlowKind {
    /// Lowercase category name, used in prompts and commit messages
    pub fn label(&self) -> &'static str {
        match self {
            FlowKind::Feature => "feature",
            FlowKind::Release => "release",
            FlowKind::Hotfix => "hotfix",
            FlowKind::Support => "support",
        }
    }

    /// The configured branch prefix for this category
    pub fn prefix<'a>(&self, config: &'a GitFlowConfig) -> &'a str {
        match self {
            FlowKind::Feature => &config.feature_prefix,
            FlowKind::Release => &config.release_prefix,
            FlowKind::Hotfix => &config.hotfix_prefix,
            FlowKind::Support => &config.support_prefix,
        }
    }

    /// Message for the version commit on the new branch
    pub fn commit_message(&self) -> String {
        format!("updating poms for {}", self.label())
    }
}

/// Fails with a conflict error when a branch of exactly this name exists.
///
/// Runs immediately before branch creation, after the target version is
/// final: interactive prompting leaves a window between catalog listing and
/// creation. The check-then-create sequence itself is still racy against
/// external ref mutation; that window is accepted (see DESIGN.md).
pub fn ensure_branch_absent(git: &dyn VersionControl, full_name: &str) -> Result<()> {
    if git.branch_exists(full_name)? {
        return Err(GitFlowError::conflict(format!(
            "branch '{}' already exists",
            full_name
        )));
    }

    Ok(())
}
