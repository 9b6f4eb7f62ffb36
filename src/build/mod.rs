//! Build-tool abstraction layer
//!
//! The branch-start workflow needs three things from the project's build
//! tooling: read the current version, rewrite it, and optionally run a full
//! clean build. [BuildTool] captures exactly that surface.
//!
//! Implementations:
//!
//! - [cargo::CargoBuild]: reads and rewrites `Cargo.toml`, shells out to
//!   `cargo` for the clean build
//! - [mock::MockBuild]: a scripted implementation for testing

pub mod cargo;
pub mod mock;

pub use cargo::CargoBuild;
pub use mock::MockBuild;

use crate::error::Result;

/// Common build-tool operation trait for abstraction
pub trait BuildTool: Send + Sync {
    /// Read the project's current version from its manifest.
    fn current_version(&self) -> Result<String>;

    /// Rewrite the project's version declaration to `new_version`.
    ///
    /// No backup files are retained; the change is expected to be committed
    /// immediately by the caller.
    fn set_version(&self, new_version: &str) -> Result<()>;

    /// Run a full clean build of the project.
    fn clean_install(&self) -> Result<()>;
}
