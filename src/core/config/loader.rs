#![allow(clippy::result_large_err)]

use super::ReadmeConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file at the repository root.
pub const CONFIG_FILE_NAME: &str = "workflow-readme.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from the repository root (root/workflow-readme.toml)
    /// Environment variables override config file values
    pub fn load_from_root(root: &Path) -> Result<ReadmeConfig, AppError> {
        let config_path = root.join(CONFIG_FILE_NAME);
        let mut config = Self::load_from_file(&config_path)?.unwrap_or_default();

        Self::apply_env_overrides(&mut config);
        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<ReadmeConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                ErrorCategory::IoError,
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: ReadmeConfig = toml::from_str(&content).map_err(|e| {
            AppError::with_source(
                ErrorCategory::ValidationError,
                format!("Failed to parse config file {}", path.display()),
                e,
            )
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());

        Ok(Some(config))
    }

    fn apply_env_overrides(config: &mut ReadmeConfig) {
        if let Ok(template) = env::var("WORKFLOW_README_TEMPLATE") {
            config.paths.template = PathBuf::from(template);
        }

        if let Ok(output) = env::var("WORKFLOW_README_OUTPUT") {
            config.paths.output = PathBuf::from(output);
        }

        if let Ok(workflow_dir) = env::var("WORKFLOW_README_WORKFLOW_DIR") {
            config.paths.workflow_dir = PathBuf::from(workflow_dir);
        }
    }

    /// Validate configuration values
    pub fn validate_config(config: &ReadmeConfig) -> Result<(), AppError> {
        let paths = [
            ("paths.template", &config.paths.template),
            ("paths.output", &config.paths.output),
            ("paths.workflow_dir", &config.paths.workflow_dir),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(AppError::new(
                    ErrorCategory::ValidationError,
                    format!("{} cannot be empty", key),
                ));
            }
        }

        if config.paths.template == config.paths.output {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "paths.output must differ from paths.template",
            ));
        }

        Ok(())
    }
}
