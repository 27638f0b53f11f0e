pub mod commands;

pub use commands::RunSummary;

use crate::core::error::AppError;
use crate::logging::Verbosity;
use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
{after-help}\n";

#[derive(Parser, Debug)]
#[command(name = "workflow-readme")]
#[command(version = crate::VERSION)]
#[command(about = "Document the reusable CI workflows of a repository in its README")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_help = "FILES (relative to the repository root):\n    README.md.j2          template, loops with {% for f in workflows %}...{% endfor %}\n    README.md             rendered output, overwritten on every run\n    .github/workflows     scanned for *.yml files declaring `on: workflow_call`\n\nRun from the repository root or its src/ directory. Paths can be changed in\nworkflow-readme.toml or with WORKFLOW_README_TEMPLATE, WORKFLOW_README_OUTPUT\nand WORKFLOW_README_WORKFLOW_DIR."
)]
pub struct Args {
    /// Log with DEBUG level, including source locations
    #[arg(long)]
    pub debug: bool,

    /// Log with INFO level
    #[arg(long)]
    pub info: bool,

    /// Repository root (default: resolved from the current directory)
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,
}

impl Args {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.debug, self.info)
    }
}

pub fn run(args: &Args) -> Result<RunSummary, AppError> {
    commands::run(args)
}
