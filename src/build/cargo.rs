use crate::error::{GitFlowError, Result};
use crate::build::BuildTool;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Build tool backed by a Cargo project.
///
/// Versions are read from and written to the `[package]` table of
/// `Cargo.toml`. Writing is a targeted single-line edit so the rest of the
/// manifest (comments, ordering, other tables) is left byte-identical.
pub struct CargoBuild {
    manifest_path: PathBuf,
    project_dir: PathBuf,
}

impl CargoBuild {
    /// Create a build tool for the manifest at `manifest_path`
    pub fn new<P: AsRef<Path>>(manifest_path: P) -> Self {
        let manifest_path = manifest_path.as_ref().to_path_buf();
        let project_dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        CargoBuild {
            manifest_path,
            project_dir,
        }
    }

    fn version_from_manifest(contents: &str) -> Result<String> {
        let manifest: toml::Value = toml::from_str(contents)
            .map_err(|e| GitFlowError::build(format!("Cannot parse Cargo.toml: {}", e)))?;

        manifest
            .get("package")
            .and_then(|pkg| pkg.get("version"))
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .ok_or_else(|| GitFlowError::build("Cargo.toml has no package.version"))
    }

    fn run_cargo(&self, subcommand: &str) -> Result<()> {
        let status = Command::new("cargo")
            .arg(subcommand)
            .current_dir(&self.project_dir)
            .status()?;

        if !status.success() {
            return Err(GitFlowError::build(format!(
                "cargo {} exited with {}",
                subcommand, status
            )));
        }

        Ok(())
    }
}

impl BuildTool for CargoBuild {
    fn current_version(&self) -> Result<String> {
        let contents = fs::read_to_string(&self.manifest_path)?;
        Self::version_from_manifest(&contents)
    }

    fn set_version(&self, new_version: &str) -> Result<()> {
        let contents = fs::read_to_string(&self.manifest_path)?;
        let current = Self::version_from_manifest(&contents)?;

        // Rewrite only the version key of the [package] table. A full
        // parse-and-serialize round trip would clobber manifest formatting.
        let mut rewritten = Vec::with_capacity(contents.lines().count());
        let mut in_package = false;
        let mut replaced = false;

        for line in contents.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with('[') {
                in_package = trimmed == "[package]";
            }

            let key = trimmed.split('=').next().unwrap_or("").trim();
            if in_package && !replaced && key == "version" {
                rewritten.push(line.replacen(&current, new_version, 1));
                replaced = true;
            } else {
                rewritten.push(line.to_string());
            }
        }

        if !replaced {
            return Err(GitFlowError::build(
                "Cargo.toml has no version line in [package]",
            ));
        }

        let mut output = rewritten.join("\n");
        if contents.ends_with('\n') {
            output.push('\n');
        }

        fs::write(&self.manifest_path, output)?;
        Ok(())
    }

    fn clean_install(&self) -> Result<()> {
        self.run_cargo("clean")?;
        self.run_cargo("build")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MANIFEST: &str = r#"# project manifest
[package]
name = "demo"
version = "1.2.0"
edition = "2021"

[dependencies]
serde = { version = "1.0", features = ["derive"] }
"#;

    fn manifest_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_current_version() {
        let file = manifest_file();
        let build = CargoBuild::new(file.path());
        assert_eq!(build.current_version().unwrap(), "1.2.0");
    }

    #[test]
    fn test_set_version_rewrites_package_version_only() {
        let file = manifest_file();
        let build = CargoBuild::new(file.path());

        build.set_version("1.2.1").unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert!(contents.contains("version = \"1.2.1\""));
        // The dependency version requirement is untouched
        assert!(contents.contains("serde = { version = \"1.0\""));
        assert!(contents.contains("# project manifest"));
        assert_eq!(build.current_version().unwrap(), "1.2.1");
    }

    #[test]
    fn test_set_version_skips_other_version_like_keys() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"[package]\nname = \"demo\"\nrust-version = \"1.70\"\nversion = \"0.3.0\"\n",
        )
        .unwrap();
        file.flush().unwrap();

        let build = CargoBuild::new(file.path());
        build.set_version("0.3.1").unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert!(contents.contains("rust-version = \"1.70\""));
        assert!(contents.contains("version = \"0.3.1\""));
    }

    #[test]
    fn test_missing_package_version_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[package]\nname = \"demo\"\n").unwrap();
        file.flush().unwrap();

        let build = CargoBuild::new(file.path());
        assert!(build.current_version().is_err());
        assert!(build.set_version("1.0.0").is_err());
    }
}
