#![allow(clippy::result_large_err)]

//! Rendering of the README template.
//!
//! Only four exact directive tokens are recognised. Everything else, including
//! other `{{ ... }}` or `{% ... %}` sequences, is copied through verbatim.

use crate::core::error::AppError;
use crate::core::types::{ErrorCategory, WorkflowEntry};
use crate::utils::files::write_output;
use std::fs;
use std::path::Path;

pub const LOOP_OPEN: &str = "{% for f in workflows %}";
pub const LOOP_CLOSE: &str = "{% endfor %}";
pub const FIELD_FILE: &str = "{{ f.file }}";
pub const FIELD_NAME: &str = "{{ f.name }}";

/// Entry attribute referenced by a field marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    File,
}

impl Field {
    pub fn marker(self) -> &'static str {
        match self {
            Field::Name => FIELD_NAME,
            Field::File => FIELD_FILE,
        }
    }

    fn value(self, workflow: &WorkflowEntry) -> &str {
        match self {
            Field::Name => &workflow.name,
            Field::File => &workflow.file,
        }
    }
}

/// Template structure errors. Offsets are byte positions in the template text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("loop opened at byte {offset} is never closed")]
    UnclosedLoop { offset: usize },
    #[error("`{{% endfor %}}` at byte {offset} has no matching loop")]
    UnexpectedEndFor { offset: usize },
    #[error("nested loop at byte {offset} is not supported")]
    NestedLoop { offset: usize },
    #[error("`{marker}` at byte {offset} is used outside of a loop")]
    FieldOutsideLoop { offset: usize, marker: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    LoopOpen,
    LoopClose,
    Field(Field),
}

const DIRECTIVES: [(&str, Directive); 4] = [
    (LOOP_OPEN, Directive::LoopOpen),
    (LOOP_CLOSE, Directive::LoopClose),
    (FIELD_FILE, Directive::Field(Field::File)),
    (FIELD_NAME, Directive::Field(Field::Name)),
];

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Directive(Directive),
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Field(Field),
}

#[derive(Debug, PartialEq, Eq)]
enum Node<'a> {
    Text(&'a str),
    Loop(Vec<Segment<'a>>),
}

/// Split `template` into literal text and directive tokens, each tagged with its byte offset.
fn tokenize(template: &str) -> Vec<(usize, Token<'_>)> {
    let mut tokens = Vec::new();
    let mut position = 0;

    while position < template.len() {
        let rest = &template[position..];
        let next = DIRECTIVES
            .iter()
            .filter_map(|(marker, directive)| {
                rest.find(marker)
                    .map(|index| (position + index, marker.len(), *directive))
            })
            .min_by_key(|(start, _, _)| *start);

        match next {
            Some((start, length, directive)) => {
                if start > position {
                    tokens.push((position, Token::Text(&template[position..start])));
                }
                tokens.push((start, Token::Directive(directive)));
                position = start + length;
            }
            None => {
                tokens.push((position, Token::Text(rest)));
                break;
            }
        }
    }

    tokens
}

fn parse(template: &str) -> Result<Vec<Node<'_>>, TemplateError> {
    let mut nodes = Vec::new();
    let mut open: Option<(usize, Vec<Segment<'_>>)> = None;

    for (offset, token) in tokenize(template) {
        match token {
            Token::Text(text) => match open.as_mut() {
                Some((_, body)) => body.push(Segment::Text(text)),
                None => nodes.push(Node::Text(text)),
            },
            Token::Directive(Directive::Field(field)) => match open.as_mut() {
                Some((_, body)) => body.push(Segment::Field(field)),
                None => {
                    return Err(TemplateError::FieldOutsideLoop {
                        offset,
                        marker: field.marker(),
                    })
                }
            },
            Token::Directive(Directive::LoopOpen) => {
                if open.is_some() {
                    return Err(TemplateError::NestedLoop { offset });
                }
                open = Some((offset, Vec::new()));
            }
            Token::Directive(Directive::LoopClose) => match open.take() {
                Some((_, body)) => nodes.push(Node::Loop(body)),
                None => return Err(TemplateError::UnexpectedEndFor { offset }),
            },
        }
    }

    if let Some((offset, _)) = open {
        return Err(TemplateError::UnclosedLoop { offset });
    }
    Ok(nodes)
}

/// Expand `template` against `workflows` and strip trailing newline characters.
pub fn render_str(template: &str, workflows: &[WorkflowEntry]) -> Result<String, TemplateError> {
    let nodes = parse(template)?;
    let mut output = String::with_capacity(template.len());

    for node in &nodes {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Loop(body) => {
                for workflow in workflows {
                    for segment in body {
                        match segment {
                            Segment::Text(text) => output.push_str(text),
                            Segment::Field(field) => output.push_str(field.value(workflow)),
                        }
                    }
                }
            }
        }
    }

    let trimmed = output.trim_end_matches('\n').len();
    output.truncate(trimmed);
    Ok(output)
}

/// Render the template at `template_path` and overwrite `output_path` with the result.
pub fn render_file(
    workflows: &[WorkflowEntry],
    template_path: &Path,
    output_path: &Path,
) -> Result<(), AppError> {
    let template = fs::read_to_string(template_path).map_err(|e| {
        AppError::with_source(
            ErrorCategory::IoError,
            format!("Failed to read template file {}", template_path.display()),
            e,
        )
    })?;

    let content = render_str(&template, workflows).map_err(|e| {
        AppError::with_source(
            ErrorCategory::TemplateError,
            format!("Failed to render template {}", template_path.display()),
            e,
        )
    })?;
    tracing::debug!(
        bytes = content.len(),
        workflows = workflows.len(),
        "Rendered template"
    );

    write_output(output_path, content.as_bytes())
}
