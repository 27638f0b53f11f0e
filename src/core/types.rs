use serde::{Deserialize, Serialize};

/// One reusable workflow discovered in the workflow directory.
///
/// `name` is the title declared by the workflow's top-level `name` key and `file`
/// is the base file name of the definition (never a full path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEntry {
    pub name: String,
    pub file: String,
}

impl WorkflowEntry {
    pub fn new<N: Into<String>, F: Into<String>>(name: N, file: F) -> Self {
        WorkflowEntry {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ValidationError,
    IoError,
    SerializationError,
    TemplateError,
    NoWorkflowsFound,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
}
