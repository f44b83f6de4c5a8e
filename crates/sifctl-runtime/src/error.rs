//! Error types for sifctl-runtime

use sifctl_core::ExecError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using sifctl-runtime's error type
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors raised while negotiating with, or driving, a container runtime
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The `--version` banner could not be parsed as a semantic version
    #[error("Malformed runtime version string '{raw}': {source}")]
    MalformedVersion {
        raw: String,
        #[source]
        source: semver::Error,
    },

    /// `<exe> --version` ran but exited unsuccessfully
    #[error(
        "Runtime client failed to initialize: `{command}` returned {}{}",
        exit_code.map(|c| format!("exit code {}", c)).unwrap_or_else(|| "no exit code".to_string()),
        if output.trim().is_empty() { String::new() } else { format!("\nOutput:\n{}", output.trim()) }
    )]
    VersionProbeFailed {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// No candidate executable could be initialized
    #[error(
        "Failed to identify a usable singularity/apptainer client. Tried: {}",
        candidates.join(", ")
    )]
    RuntimeDiscoveryFailed { candidates: Vec<String> },

    /// A local recipe file named for a build does not exist
    #[error("Recipe file does not exist (build dir: {}, recipe: {recipe})", build_dir.display())]
    MissingRecipe { build_dir: PathBuf, recipe: String },

    /// The build invocation failed
    #[error("Error occurred while building SIF image: {source}")]
    BuildFailed {
        #[source]
        source: ExecError,
    },

    /// The run/exec invocation failed
    #[error("Error occurred while running container: {source}")]
    RunFailed {
        #[source]
        source: ExecError,
    },

    /// The executable invocation has no tokens
    #[error("Runtime executable is empty")]
    EmptyExecutable,

    /// The client has no resolved version
    #[error("Runtime client is not ready (state: {state})")]
    NotReady { state: String },

    /// Launching the version probe failed
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    /// Create a missing recipe error
    pub fn missing_recipe(build_dir: impl Into<PathBuf>, recipe: impl Into<String>) -> Self {
        Self::MissingRecipe {
            build_dir: build_dir.into(),
            recipe: recipe.into(),
        }
    }

    /// Create a not-ready error
    pub fn not_ready(state: impl Into<String>) -> Self {
        Self::NotReady {
            state: state.into(),
        }
    }

    /// Create a discovery failure listing every candidate tried
    pub fn discovery_failed<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RuntimeDiscoveryFailed {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_failed_lists_candidates() {
        let err = RuntimeError::discovery_failed(["singularity", "sudo singularity"]);
        assert_eq!(
            err.to_string(),
            "Failed to identify a usable singularity/apptainer client. Tried: singularity, sudo singularity"
        );
    }

    #[test]
    fn test_version_probe_failed_display() {
        let err = RuntimeError::VersionProbeFailed {
            command: "apptainer --version".to_string(),
            exit_code: Some(127),
            output: "command not found\n".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("`apptainer --version` returned exit code 127"));
        assert!(msg.contains("command not found"));
    }

    #[test]
    fn test_build_failed_keeps_context() {
        let err = RuntimeError::BuildFailed {
            source: ExecError::non_zero_exit("apptainer build a.sif a.def", Some(255), None),
        };
        assert!(err.to_string().contains("apptainer build a.sif a.def"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
