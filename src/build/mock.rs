use crate::build::BuildTool;
use crate::error::{GitFlowError, Result};
use std::sync::Mutex;

/// Mock build tool for testing without a real project manifest.
pub struct MockBuild {
    state: Mutex<MockBuildState>,
}

struct MockBuildState {
    version: String,
    version_history: Vec<String>,
    installs: usize,
    fail_install: bool,
}

impl MockBuild {
    /// Create a mock build tool reporting the given current version
    pub fn new(version: impl Into<String>) -> Self {
        MockBuild {
            state: Mutex::new(MockBuildState {
                version: version.into(),
                version_history: Vec::new(),
                installs: 0,
                fail_install: false,
            }),
        }
    }

    /// Make clean_install fail
    pub fn fail_install(&self) {
        self.state.lock().unwrap().fail_install = true;
    }

    /// Versions written via set_version, in call order
    pub fn version_history(&self) -> Vec<String> {
        self.state.lock().unwrap().version_history.clone()
    }

    /// Number of successful clean_install runs
    pub fn installs(&self) -> usize {
        self.state.lock().unwrap().installs
    }
}

impl BuildTool for MockBuild {
    fn current_version(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().version.clone())
    }

    fn set_version(&self, new_version: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.version = new_version.to_string();
        state.version_history.push(new_version.to_string());
        Ok(())
    }

    fn clean_install(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_install {
            return Err(GitFlowError::build("clean install failed"));
        }

        state.installs += 1;
        Ok(())
    }
}
