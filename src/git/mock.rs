use crate::error::{GitFlowError, Result};
use crate::git::VersionControl;
use std::sync::Mutex;

/// Mock version-control backend for testing without actual git operations.
///
/// Every trait call is appended to an operation log so tests can assert on
/// command ordering, or on the absence of commands entirely.
pub struct MockGit {
    state: Mutex<MockGitState>,
}

struct MockGitState {
    branches: Vec<String>,
    current: String,
    dirty: bool,
    operations: Vec<String>,
}

impl MockGit {
    /// Create a mock repository with only the given branch checked out
    pub fn new(current_branch: impl Into<String>) -> Self {
        let current = current_branch.into();
        MockGit {
            state: Mutex::new(MockGitState {
                branches: vec![current.clone()],
                current,
                dirty: false,
                operations: Vec::new(),
            }),
        }
    }

    /// Add an existing branch
    pub fn add_branch(&self, name: impl Into<String>) {
        self.state.lock().unwrap().branches.push(name.into());
    }

    /// Mark the working tree as having uncommitted changes
    pub fn set_dirty(&self, dirty: bool) {
        self.state.lock().unwrap().dirty = dirty;
    }

    /// Snapshot of the operation log, in call order
    pub fn operations(&self) -> Vec<String> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Operations that mutate the repository (checkout/create/commit)
    pub fn mutating_operations(&self) -> Vec<String> {
        self.operations()
            .into_iter()
            .filter(|op| {
                op.starts_with("checkout ")
                    || op.starts_with("create ")
                    || op.starts_with("commit ")
            })
            .collect()
    }
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new("master")
    }
}

impl VersionControl for MockGit {
    fn list_branches(&self, prefix: &str) -> Result<Vec<String>> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(format!("list {}", prefix));

        Ok(state
            .branches
            .iter()
            .filter(|b| b.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        state.operations.push("status".to_string());
        Ok(state.dirty)
    }

    fn checkout(&self, branch_name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(format!("checkout {}", branch_name));

        if !state.branches.iter().any(|b| b == branch_name) {
            return Err(GitFlowError::validation(format!(
                "branch not found: {}",
                branch_name
            )));
        }

        state.current = branch_name.to_string();
        Ok(())
    }

    fn create_branch(&self, new_name: &str, from_branch: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .operations
            .push(format!("create {} from {}", new_name, from_branch));

        if state.branches.iter().any(|b| b == new_name) {
            return Err(GitFlowError::conflict(format!(
                "branch '{}' already exists",
                new_name
            )));
        }

        state.branches.push(new_name.to_string());
        state.current = new_name.to_string();
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(format!("commit {}", message));
        Ok(())
    }

    fn branch_exists(&self, branch_name: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(format!("exists {}", branch_name));
        Ok(state.branches.iter().any(|b| b == branch_name))
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().current.clone())
    }
}
