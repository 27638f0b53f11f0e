use clap::Parser;
use std::process::ExitCode;
use workflow_readme::cli::{self, Args};
use workflow_readme::logging;

fn main() -> ExitCode {
    let args = Args::parse();

    let logging = match logging::init(args.verbosity()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(console = %logging.console_output(), "Logging initialized");

    match cli::run(&args) {
        Ok(summary) => {
            tracing::debug!(workflows = summary.workflows.len(), "Run completed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(code = %err.code, category = %err.category, "Run failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
