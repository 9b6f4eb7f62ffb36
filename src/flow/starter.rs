//! Branch-start orchestration.
//!
//! One [BranchStarter] run realizes a single branch-start transition:
//! precondition check, source resolution, version negotiation, conflict
//! check, branch creation, version commit, optional build. All repository
//! and build mutations go through the injected ports, one call at a time.

use regex::Regex;

use crate::build::BuildTool;
use crate::config::GitFlowConfig;
use crate::error::{GitFlowError, Result};
use crate::flow::selector::select_source_branch;
use crate::flow::{ensure_branch_absent, FlowKind};
use crate::git::VersionControl;
use crate::prompt::Prompter;
use crate::version;

/// Per-invocation behavior switches
#[derive(Debug, Clone, Copy)]
pub struct StartOptions {
    /// Run the build tool's clean-install after the version commit
    pub install: bool,
    /// Ask the operator to confirm computed defaults where the workflow
    /// supports skipping the question
    pub interactive: bool,
}

impl Default for StartOptions {
    fn default() -> Self {
        StartOptions {
            install: false,
            interactive: true,
        }
    }
}

/// What a completed start transition produced
#[derive(Debug, Clone, PartialEq)]
pub struct StartOutcome {
    /// The branch that was created and checked out
    pub branch: String,
    /// The version committed on it, if the category carries one
    pub version: Option<String>,
    /// Failure message of the optional install step; the branch and its
    /// version commit stay in place when this is set
    pub install_error: Option<String>,
}

/// Drives branch-start transitions against injected backend ports.
pub struct BranchStarter<'a> {
    git: &'a dyn VersionControl,
    build: &'a dyn BuildTool,
    prompter: &'a dyn Prompter,
    config: &'a GitFlowConfig,
    options: StartOptions,
}

impl<'a> BranchStarter<'a> {
    pub fn new(
        git: &'a dyn VersionControl,
        build: &'a dyn BuildTool,
        prompter: &'a dyn Prompter,
        config: &'a GitFlowConfig,
        options: StartOptions,
    ) -> Self {
        BranchStarter {
            git,
            build,
            prompter,
            config,
            options,
        }
    }

    /// Run the start transition for one branch category.
    ///
    /// Fails before any mutation on a dirty working tree. Failures up to
    /// branch creation leave the repository untouched; a failure after the
    /// branch exists leaves it in place without the version commit, which
    /// the operator resolves manually.
    pub fn start(&self, kind: FlowKind) -> Result<StartOutcome> {
        if self.git.has_uncommitted_changes()? {
            return Err(GitFlowError::DirtyWorkingTree);
        }

        match kind {
            FlowKind::Feature => self.start_feature(),
            FlowKind::Release => self.start_release(),
            FlowKind::Hotfix => self.start_hotfix(),
            FlowKind::Support => self.start_support(),
        }
    }

    fn start_hotfix(&self) -> Result<StartOutcome> {
        let candidates = self.git.list_branches(&self.config.support_prefix)?;
        let source = select_source_branch(
            self.prompter,
            &candidates,
            &self.config.production_branch,
            "Support branches:",
            "Choose support branch to hotfix",
        )?;

        // The manifest read below must see the source branch's baseline
        self.checkout_source(&source)?;

        let current = self.build.current_version()?;
        let proposal = version::propose_next(&current, &self.config.default_version);
        let target = self.confirm_version("What is the hotfix version?", &proposal)?;

        let branch = format!("{}{}", self.config.hotfix_prefix, target);
        ensure_branch_absent(self.git, &branch)?;

        self.git.create_branch(&branch, &source)?;
        self.commit_version(FlowKind::Hotfix, branch, target)
    }

    fn start_support(&self) -> Result<StartOutcome> {
        let production = &self.config.production_branch;
        self.checkout_source(production)?;

        let current = self.build.current_version()?;
        let proposal = version::truncate_major_minor(&current, &self.config.default_version);
        let target = if self.options.interactive {
            self.confirm_version("What is the support version?", &proposal)?
        } else {
            proposal
        };

        let branch = format!("{}{}", self.config.support_prefix, target);
        ensure_branch_absent(self.git, &branch)?;

        self.git.create_branch(&branch, production)?;
        self.commit_version(FlowKind::Support, branch, target)
    }

    fn start_release(&self) -> Result<StartOutcome> {
        // Only one release line at a time
        let existing = self.git.list_branches(&self.config.release_prefix)?;
        if let Some(branch) = existing.first() {
            return Err(GitFlowError::conflict(format!(
                "release branch '{}' already exists. Finish it before starting a new release.",
                branch
            )));
        }

        let development = &self.config.development_branch;
        self.checkout_source(development)?;

        let current = self.build.current_version()?;
        let target = self.confirm_version("What is the release version?", &current)?;

        let branch = format!("{}{}", self.config.release_prefix, target);
        ensure_branch_absent(self.git, &branch)?;

        self.git.create_branch(&branch, development)?;
        self.commit_version(FlowKind::Release, branch, target)
    }

    fn start_feature(&self) -> Result<StartOutcome> {
        let development = &self.config.development_branch;
        self.checkout_source(development)?;

        let name = self.prompt_feature_name()?;
        let branch = format!("{}{}", self.config.feature_prefix, name);
        ensure_branch_absent(self.git, &branch)?;

        self.git.create_branch(&branch, development)?;

        // Feature branches carry no version change
        Ok(StartOutcome {
            branch,
            version: None,
            install_error: None,
        })
    }

    /// Check out the resolved source branch unless it is already current.
    fn checkout_source(&self, branch: &str) -> Result<()> {
        if self.git.current_branch()? != branch {
            self.git.checkout(branch)?;
        }

        Ok(())
    }

    /// Ask for the target version, with the proposal as bracketed default.
    ///
    /// Blank input accepts the proposal; so does a cancelled prompt (the
    /// proposal is the best available default).
    fn confirm_version(&self, question: &str, proposal: &str) -> Result<String> {
        let message = format!("{} [{}]", question, proposal);

        match self.prompter.prompt_text(&message)? {
            Some(answer) if !answer.trim().is_empty() => Ok(answer.trim().to_string()),
            Some(_) => Ok(proposal.to_string()),
            None => {
                tracing::warn!(proposal, "version prompt cancelled, using proposal");
                Ok(proposal.to_string())
            }
        }
    }

    /// Ask for a feature branch name until one is given.
    ///
    /// Unlike version prompts there is no computable default here, so a
    /// cancelled prompt escalates to a validation error.
    fn prompt_feature_name(&self) -> Result<String> {
        let message = format!(
            "What is a name of feature branch? {}",
            self.config.feature_prefix
        );

        loop {
            match self.prompter.prompt_text(&message)? {
                Some(name) if !name.trim().is_empty() => {
                    let name = name.trim().to_string();
                    validate_feature_name(&name)?;
                    return Ok(name);
                }
                Some(_) => continue,
                None => {
                    return Err(GitFlowError::validation("feature branch name is blank"));
                }
            }
        }
    }

    fn commit_version(
        &self,
        kind: FlowKind,
        branch: String,
        target: String,
    ) -> Result<StartOutcome> {
        self.build.set_version(&target)?;
        self.git.commit_all(&kind.commit_message())?;

        let install_error = if self.options.install {
            match self.build.clean_install() {
                Ok(()) => None,
                Err(e) => {
                    // The branch and its version commit are kept; the
                    // operator decides what to do about the build.
                    tracing::error!(error = %e, "clean install failed on the new branch");
                    Some(e.to_string())
                }
            }
        } else {
            None
        };

        Ok(StartOutcome {
            branch,
            version: Some(target),
            install_error,
        })
    }
}

fn validate_feature_name(name: &str) -> Result<()> {
    let pattern = Regex::new(r"^[A-Za-z0-9._-]+$")
        .map_err(|e| GitFlowError::validation(format!("invalid name pattern: {}", e)))?;

    if !pattern.is_match(name) {
        return Err(GitFlowError::validation(format!(
            "feature branch name '{}' contains unsupported characters",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_feature_names() {
        assert!(validate_feature_name("login-rework").is_ok());
        assert!(validate_feature_name("JIRA_123").is_ok());
        assert!(validate_feature_name("v2.api").is_ok());
    }

    #[test]
    fn test_invalid_feature_names() {
        assert!(validate_feature_name("has space").is_err());
        assert!(validate_feature_name("nested/name").is_err());
        assert!(validate_feature_name("emoji!").is_err());
    }
}
