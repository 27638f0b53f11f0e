use crate::logging::layers::console::ConsoleOutput;
use crate::Result;
use anyhow::anyhow;
use std::env;
use std::str::FromStr;
use tracing_subscriber::filter::Directive;

/// Environment variable that redirects diagnostic logs regardless of verbosity flags.
pub const LOG_OUTPUT_ENV: &str = "WORKFLOW_README_LOG_OUTPUT";

/// Diagnostic verbosity selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Diagnostics are discarded; only progress notices reach the terminal.
    #[default]
    Quiet,
    Info,
    /// Info plus parsed documents, with source locations.
    Debug,
}

impl Verbosity {
    /// `--debug` wins over `--info`.
    pub fn from_flags(debug: bool, info: bool) -> Self {
        if debug {
            Verbosity::Debug
        } else if info {
            Verbosity::Info
        } else {
            Verbosity::Quiet
        }
    }
}

/// Resolved logging configuration after applying flags and env overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub default_level: String,
    pub console_output: ConsoleOutput,
    pub with_source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_verbosity(Verbosity::Quiet)
    }
}

impl LoggingConfig {
    pub fn for_verbosity(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Quiet => Self {
                default_level: "off".to_string(),
                console_output: ConsoleOutput::None,
                with_source_location: false,
            },
            Verbosity::Info => Self {
                default_level: "info".to_string(),
                console_output: ConsoleOutput::Stderr,
                with_source_location: false,
            },
            Verbosity::Debug => Self {
                default_level: "debug".to_string(),
                console_output: ConsoleOutput::Stderr,
                with_source_location: true,
            },
        }
    }

    /// Load configuration with deterministic precedence: flags, then env overrides.
    pub fn load(verbosity: Verbosity) -> Result<Self> {
        let mut config = Self::for_verbosity(verbosity);
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        // An explicit RUST_LOG filter is a request to see output even without flags.
        if let Ok(filter) = env::var("RUST_LOG") {
            if !filter.trim().is_empty() && self.console_output == ConsoleOutput::None {
                self.console_output = ConsoleOutput::Stderr;
            }
        }

        if let Ok(output) = env::var(LOG_OUTPUT_ENV) {
            if !output.trim().is_empty() {
                self.console_output = ConsoleOutput::from_str(&output).map_err(|e| anyhow!(e))?;
                // Choosing a sink without a flag still needs a level that lets events through.
                if self.console_output != ConsoleOutput::None && self.default_level == "off" {
                    self.default_level = "info".to_string();
                }
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        Directive::from_str(&self.default_level)
            .map_err(|_| anyhow!("log level must be a valid tracing directive"))?;
        Ok(())
    }
}
