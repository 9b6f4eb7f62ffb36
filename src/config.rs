use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for git-flow.
///
/// Contains the long-lived branch names, the per-category branch prefixes,
/// the fallback version, and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitFlowConfig {
    /// The branch representing the currently released state. Default source
    /// for hotfix and support starts, and menu index 0 everywhere.
    #[serde(default = "default_production_branch")]
    pub production_branch: String,

    /// The long-lived integration branch that feature and release lines
    /// start from.
    #[serde(default = "default_development_branch")]
    pub development_branch: String,

    #[serde(default = "default_feature_prefix")]
    pub feature_prefix: String,

    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,

    #[serde(default = "default_hotfix_prefix")]
    pub hotfix_prefix: String,

    #[serde(default = "default_support_prefix")]
    pub support_prefix: String,

    /// Version substituted when the current project version cannot be
    /// parsed as a dotted numeric tuple.
    #[serde(default = "default_version")]
    pub default_version: String,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_production_branch() -> String {
    "master".to_string()
}

fn default_development_branch() -> String {
    "develop".to_string()
}

fn default_feature_prefix() -> String {
    "feature/".to_string()
}

fn default_release_prefix() -> String {
    "release/".to_string()
}

fn default_hotfix_prefix() -> String {
    "hotfix/".to_string()
}

fn default_support_prefix() -> String {
    "support/".to_string()
}

fn default_version() -> String {
    "1.0.1".to_string()
}

/// Configuration for behavior customization.
///
/// Controls runtime behavior of git-flow without affecting branch naming.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Run the build tool's clean-install after the version commit.
    #[serde(default)]
    pub install_project: bool,
}

impl Default for GitFlowConfig {
    fn default() -> Self {
        GitFlowConfig {
            production_branch: default_production_branch(),
            development_branch: default_development_branch(),
            feature_prefix: default_feature_prefix(),
            release_prefix: default_release_prefix(),
            hotfix_prefix: default_hotfix_prefix(),
            support_prefix: default_support_prefix(),
            default_version: default_version(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitflow.toml` in current directory
/// 3. `~/.config/.gitflow.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(GitFlowConfig)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<GitFlowConfig, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitflow.toml").exists() {
        fs::read_to_string("./gitflow.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitflow.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(GitFlowConfig::default());
        }
    } else {
        return Ok(GitFlowConfig::default());
    };

    let config: GitFlowConfig = toml::from_str(&config_str)?;
    Ok(config)
}
