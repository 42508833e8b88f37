//! Common test utilities for samcheck integration tests

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use samcheck_cli::test_utils::write_template;

/// A temporary project directory with an isolated global config.
pub struct TestProject {
    _temp_dir: TempDir,
    root: PathBuf,
    config_path: PathBuf,
}

impl TestProject {
    /// Empty project.
    pub fn new() -> Self {
        samcheck_cli::test_utils::init_test_logging(None);
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let config_path = root.join(".samcheck-config.toml");
        Self {
            _temp_dir: temp_dir,
            root,
            config_path,
        }
    }

    /// Project directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a file relative to the project directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        write_template(&self.root, name, content)
    }

    /// Write the global config used by [`TestProject::samcheck`].
    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.config_path, content).expect("Failed to write config");
    }

    /// `samcheck` running in the project directory with the project's config
    /// and no AWS environment.
    pub fn samcheck(&self) -> Command {
        let mut cmd = Command::cargo_bin("samcheck").expect("samcheck binary");
        cmd.current_dir(&self.root)
            .arg("--config")
            .arg(&self.config_path)
            .env_remove("AWS_REGION")
            .env_remove("AWS_PROFILE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}
