#![allow(clippy::result_large_err)]

use crate::cli::Args;
use crate::core::{
    detect_reusable_workflows, render_file, resolve_root_dir, AppError, ConfigLoader,
    ErrorCategory, ProjectPaths, WorkflowEntry,
};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub workflows: Vec<WorkflowEntry>,
}

/// Resolve the repository root from the arguments and regenerate its README.
pub fn run(args: &Args) -> Result<RunSummary, AppError> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => {
            let cwd = env::current_dir().map_err(|e| {
                AppError::with_source(
                    ErrorCategory::IoError,
                    "Failed to determine the current directory",
                    e,
                )
            })?;
            resolve_root_dir(&cwd)
        }
    };
    tracing::info!("Repository root: {}", root.display());

    generate(&root)
}

/// Detect the reusable workflows under `root` and render them into the output file.
pub fn generate(root: &Path) -> Result<RunSummary, AppError> {
    let config = ConfigLoader::load_from_root(root)?;
    let paths = ProjectPaths::new(root, &config);
    paths.check_preconditions()?;

    print_log(&format!(
        "Detect reusable workflows: {}",
        paths.workflow_dir.display()
    ));
    let workflows = detect_reusable_workflows(&paths.workflow_dir)?;
    if workflows.is_empty() {
        return Err(AppError::new(
            ErrorCategory::NoWorkflowsFound,
            format!(
                "No reusable workflows found in {}",
                paths.workflow_dir.display()
            ),
        ));
    }

    print_log(&format!("Render a Markdown file: {}", paths.output.display()));
    render_file(&workflows, &paths.template, &paths.output)?;
    tracing::info!(
        workflows = workflows.len(),
        "Wrote {}",
        paths.output.display()
    );

    Ok(RunSummary {
        output: paths.output,
        workflows,
    })
}

/// Progress notice shown regardless of the logging configuration.
fn print_log(message: &str) {
    println!(">>\t{}", message);
    let _ = std::io::stdout().flush();
}
