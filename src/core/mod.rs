pub mod config;
pub mod error;
pub mod template;
pub mod types;
pub mod workflow;
pub mod workspace;

pub use config::{ConfigLoader, ReadmeConfig};
pub use error::AppError;
pub use template::{render_file, render_str, TemplateError};
pub use types::*;
pub use workflow::{classify_document, detect_reusable_workflows};
pub use workspace::{resolve_root_dir, ProjectPaths};
