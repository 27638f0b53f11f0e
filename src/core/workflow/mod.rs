//! Detection of reusable workflows inside a CI workflow directory.
//!
//! A definition is reusable when its top-level `name` is a string and its `on`
//! trigger declares `workflow_call`, either as the bare string or as a key of the
//! trigger mapping. Anything else is silently ignored.

use crate::core::error::AppError;
use crate::core::types::{ErrorCategory, WorkflowEntry};
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Only files with this exact suffix are considered workflow definitions.
pub const WORKFLOW_SUFFIX: &str = ".yml";

const REUSABLE_TRIGGER: &str = "workflow_call";

/// Returns the declared workflow name when `document` describes a reusable workflow.
pub fn classify_document(document: &Value) -> Option<String> {
    let root = document.as_mapping()?;
    let name = match root.get("name") {
        Some(Value::String(name)) => name,
        _ => return None,
    };

    let reusable = match root.get("on") {
        Some(Value::Mapping(triggers)) => triggers.contains_key(REUSABLE_TRIGGER),
        Some(Value::String(trigger)) => trigger == REUSABLE_TRIGGER,
        _ => false,
    };

    reusable.then(|| name.clone())
}

/// Parse the first YAML document of `content`. An empty stream yields `Value::Null`.
pub fn parse_document(content: &str) -> Result<Value, serde_yaml::Error> {
    match serde_yaml::Deserializer::from_str(content).next() {
        Some(document) => Value::deserialize(document),
        None => Ok(Value::Null),
    }
}

/// Scan `workflow_dir` and print a progress line for every reusable workflow found.
pub fn detect_reusable_workflows(workflow_dir: &Path) -> Result<Vec<WorkflowEntry>, AppError> {
    detect_reusable_workflows_with(workflow_dir, |path, _| {
        println!("  - {}", path.display());
    })
}

/// Scan `workflow_dir`, calling `on_detected` for each reusable workflow in file name order.
///
/// Failing to enumerate the directory is fatal. A file that cannot be read or parsed is
/// logged and skipped.
pub fn detect_reusable_workflows_with<F>(
    workflow_dir: &Path,
    mut on_detected: F,
) -> Result<Vec<WorkflowEntry>, AppError>
where
    F: FnMut(&Path, &WorkflowEntry),
{
    let mut workflows = Vec::new();

    for file_name in list_candidates(workflow_dir)? {
        let path = workflow_dir.join(&file_name);
        tracing::info!("Read YAML: {}", path.display());

        let document = match load_document(&path) {
            Ok(document) => document,
            Err(err) if err.is_recoverable() => {
                tracing::warn!(code = %err.code, "Skipping {}", err);
                continue;
            }
            Err(err) => return Err(err),
        };
        tracing::debug!("YAML: {:?}", document);

        if let Some(name) = classify_document(&document) {
            let entry = WorkflowEntry::new(name, file_name);
            on_detected(&path, &entry);
            workflows.push(entry);
        }
    }

    Ok(workflows)
}

/// Names of the non-directory `.yml` entries of `workflow_dir`, sorted bytewise.
fn list_candidates(workflow_dir: &Path) -> Result<Vec<String>, AppError> {
    let read_dir_error = |e: std::io::Error| {
        AppError::with_source(
            ErrorCategory::IoError,
            format!(
                "Failed to read workflow directory {}",
                workflow_dir.display()
            ),
            e,
        )
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(workflow_dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let is_dir = entry.file_type().map_err(read_dir_error)?.is_dir();
        if is_dir {
            continue;
        }
        // Non UTF-8 names can never end with the suffix.
        if let Ok(name) = entry.file_name().into_string() {
            if name.ends_with(WORKFLOW_SUFFIX) {
                names.push(name);
            }
        }
    }

    names.sort();
    Ok(names)
}

/// Reads and parses one candidate. Failures are recoverable and tagged with the file name.
fn load_document(path: &Path) -> Result<Value, AppError> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content = fs::read_to_string(path).map_err(|e| {
        AppError::with_source(
            ErrorCategory::IoError,
            format!("Failed to read file {}", path.display()),
            e,
        )
        .with_context("file", file.as_str())
        .recoverable()
    })?;

    parse_document(&content).map_err(|e| {
        AppError::with_source(
            ErrorCategory::SerializationError,
            format!("Failed to parse YAML {}", path.display()),
            e,
        )
        .with_context("file", file.as_str())
        .recoverable()
    })
}
