pub mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration loaded from `workflow-readme.toml` at the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReadmeConfig {
    /// Locations of the template, the rendered output and the workflow directory
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Paths relative to the repository root (absolute paths are used as-is).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Template rendered into the output
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Rendered document, overwritten on every run
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Directory scanned for workflow definitions
    #[serde(default = "default_workflow_dir")]
    pub workflow_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            output: default_output(),
            workflow_dir: default_workflow_dir(),
        }
    }
}

fn default_template() -> PathBuf {
    PathBuf::from("README.md.j2")
}

fn default_output() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_workflow_dir() -> PathBuf {
    PathBuf::from(".github").join("workflows")
}
