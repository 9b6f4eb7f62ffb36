use crate::error::Result;
use crate::git::VersionControl;
use git2::{BranchType, Repository, StatusOptions};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Backend {
    repo: Repository,
}

impl Git2Backend {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;

        Ok(Git2Backend { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Repository) -> Self {
        Git2Backend { repo }
    }
}

impl VersionControl for Git2Backend {
    fn list_branches(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                if name.starts_with(prefix) {
                    names.push(name.to_string());
                }
            }
        }

        Ok(names)
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    fn checkout(&self, branch_name: &str) -> Result<()> {
        let object = self.repo.revparse_single(branch_name)?;
        self.repo.checkout_tree(&object, None)?;
        self.repo
            .set_head(&format!("refs/heads/{}", branch_name))?;

        Ok(())
    }

    fn create_branch(&self, new_name: &str, from_branch: &str) -> Result<()> {
        let commit = self.repo.revparse_single(from_branch)?.peel_to_commit()?;
        self.repo.branch(new_name, &commit, false)?;

        self.checkout(new_name)
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(())
    }

    fn branch_exists(&self, branch_name: &str) -> Result<bool> {
        match self.repo.find_branch(branch_name, BranchType::Local) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        let name = head.shorthand().ok_or_else(|| {
            crate::error::GitFlowError::validation("HEAD is not on a named branch")
        })?;

        Ok(name.to_string())
    }
}

// SAFETY: Git2Backend wraps git2::Repository which is Send. The trait bound
// requires Sync; this CLI drives one repository from one thread at a time.
unsafe impl Sync for Git2Backend {}
