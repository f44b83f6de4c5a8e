//! Error types for sifctl-core

use std::time::Duration;
use thiserror::Error;

/// Result type alias using sifctl-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for sifctl
#[derive(Error, Debug)]
pub enum Error {
    /// Settings file not found
    #[error("Settings file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid settings content
    #[error("Invalid settings: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External command failed
    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Failure of an external command invocation.
///
/// Every variant carries the rendered command line so that a failure can be
/// diagnosed without re-running it.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program could not be located on PATH
    #[error("Executable not found: {program}")]
    NotFound { program: String },

    /// The process could not be spawned or waited on
    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully
    #[error("Command `{command}` exited with {}{}", render_code(*exit_code), render_output(output))]
    NonZeroExit {
        command: String,
        /// `None` when the process was terminated by a signal
        exit_code: Option<i32>,
        /// Captured output, when the invocation captured it
        output: Option<String>,
    },

    /// The process exceeded its time budget and was killed
    #[error("Command `{command}` timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },
}

impl ExecError {
    /// Create a not-found error
    pub fn not_found(program: impl Into<String>) -> Self {
        Self::NotFound {
            program: program.into(),
        }
    }

    /// Create a launch error
    pub fn launch(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            command: command.into(),
            source,
        }
    }

    /// Create a non-zero exit error
    pub fn non_zero_exit(
        command: impl Into<String>,
        exit_code: Option<i32>,
        output: Option<String>,
    ) -> Self {
        Self::NonZeroExit {
            command: command.into(),
            exit_code,
            output,
        }
    }

    /// The command line this error refers to, if any
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::NotFound { .. } => None,
            Self::Launch { command, .. }
            | Self::NonZeroExit { command, .. }
            | Self::TimedOut { command, .. } => Some(command),
        }
    }

    /// Exit code of the failed process, when it ran to completion
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

fn render_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn render_output(output: &Option<String>) -> String {
    match output.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => format!("\nOutput:\n{}", text),
        _ => String::new(),
    }
}
