#![allow(clippy::result_large_err)]

use crate::core::config::ReadmeConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::path::{Path, PathBuf};

/// Directory name that marks the tool running from inside the repository's source folder.
const SOURCE_DIR_NAME: &str = "src";

/// Resolve the repository root from the current working directory.
///
/// Running from `<root>/src` resolves to `<root>`; anywhere else the directory itself is the root.
pub fn resolve_root_dir(current_dir: &Path) -> PathBuf {
    match (current_dir.file_name(), current_dir.parent()) {
        (Some(name), Some(parent)) if name == SOURCE_DIR_NAME => parent.to_path_buf(),
        _ => current_dir.to_path_buf(),
    }
}

/// Absolute locations of everything a run reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
    pub workflow_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: &Path, config: &ReadmeConfig) -> Self {
        ProjectPaths {
            root: root.to_path_buf(),
            template: root.join(&config.paths.template),
            output: root.join(&config.paths.output),
            workflow_dir: root.join(&config.paths.workflow_dir),
        }
    }

    /// Fail when the template or the workflow directory is missing, template first.
    pub fn check_preconditions(&self) -> Result<(), AppError> {
        if !self.template.exists() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                format!("Template file {} does not exist", self.template.display()),
            ));
        }

        if !self.workflow_dir.exists() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                format!(
                    "Workflow directory {} does not exist",
                    self.workflow_dir.display()
                ),
            ));
        }

        Ok(())
    }
}
