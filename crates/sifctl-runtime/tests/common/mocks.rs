//! Mock process runner for testing
//!
//! Provides a scripted [`ProcessRunner`] that records every invocation and
//! answers from pre-configured responses instead of spawning processes.

#![allow(dead_code)]

use sifctl_core::{CapturedOutput, CommandLine, ExecError, ProcessRunner};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mock command execution result
#[derive(Clone, Debug)]
pub enum MockCommandResult {
    /// Process ran and exited with `exit_code`, printing `output`
    Exited { exit_code: i32, output: String },
    /// Process could not be launched
    Missing,
}

impl MockCommandResult {
    pub fn success(output: &str) -> Self {
        Self::Exited {
            exit_code: 0,
            output: output.to_string(),
        }
    }

    pub fn failure(output: &str, exit_code: i32) -> Self {
        Self::Exited {
            exit_code,
            output: output.to_string(),
        }
    }
}

/// Record of a command invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockCommandInvocation {
    pub tokens: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub captured: bool,
}

impl MockCommandInvocation {
    /// Tokens joined with single spaces
    pub fn line(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Scripted process runner.
///
/// Responses are matched by the longest configured prefix of the space-joined
/// command tokens. Unmatched commands get the default response.
pub struct MockRunner {
    responses: Mutex<Vec<(String, MockCommandResult)>>,
    invocations: Mutex<Vec<MockCommandInvocation>>,
    missing_programs: Mutex<HashSet<String>>,
    default_response: MockCommandResult,
    create_build_targets: bool,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            invocations: Mutex::new(Vec::new()),
            missing_programs: Mutex::new(HashSet::new()),
            default_response: MockCommandResult::success(""),
            create_build_targets: false,
        }
    }

    /// Make `build` invocations create their target file, like a real build
    pub fn creating_build_targets(mut self) -> Self {
        self.create_build_targets = true;
        self
    }

    /// Set a mock response for commands starting with `prefix`
    pub fn mock_command(&self, prefix: &str, result: MockCommandResult) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push((prefix.to_string(), result));
        self
    }

    /// Make `--version` of `executable` print `banner`
    pub fn mock_version(&self, executable: &str, banner: &str) -> &Self {
        self.mock_command(
            &format!("{} --version", executable),
            MockCommandResult::success(banner),
        )
    }

    /// Treat `program` as not installed
    pub fn mock_missing(&self, program: &str) -> &Self {
        self.missing_programs
            .lock()
            .unwrap()
            .insert(program.to_string());
        self
    }

    /// All recorded invocations, in order
    pub fn invocations(&self) -> Vec<MockCommandInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Recorded invocations whose tokens contain `word`
    pub fn invocations_with(&self, word: &str) -> Vec<MockCommandInvocation> {
        self.invocations()
            .into_iter()
            .filter(|i| i.tokens.iter().any(|t| t == word))
            .collect()
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn respond(&self, command: &CommandLine, captured: bool) -> (String, MockCommandResult) {
        let tokens: Vec<String> = command.tokens().map(str::to_string).collect();
        let line = tokens.join(" ");
        self.invocations.lock().unwrap().push(MockCommandInvocation {
            tokens: tokens.clone(),
            cwd: command.cwd().map(PathBuf::from),
            captured,
        });

        if self
            .missing_programs
            .lock()
            .unwrap()
            .contains(command.program())
        {
            return (line, MockCommandResult::Missing);
        }

        let result = self
            .responses
            .lock()
            .unwrap()
            .iter()
            .filter(|(prefix, _)| line.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| self.default_response.clone());

        if self.create_build_targets && tokens.iter().any(|t| t == "build") && tokens.len() >= 2 {
            if let MockCommandResult::Exited { exit_code: 0, .. } = result {
                let target = PathBuf::from(&tokens[tokens.len() - 2]);
                let _ = std::fs::write(target, b"SIF");
            }
        }

        (line, result)
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, command: &CommandLine) -> Result<(), ExecError> {
        match self.respond(command, false) {
            (_, MockCommandResult::Missing) => Err(ExecError::not_found(command.program())),
            (_, MockCommandResult::Exited { exit_code: 0, .. }) => Ok(()),
            (line, MockCommandResult::Exited { exit_code, output }) => Err(
                ExecError::non_zero_exit(line, Some(exit_code), Some(output)),
            ),
        }
    }

    fn run_and_capture(&self, command: &CommandLine) -> Result<CapturedOutput, ExecError> {
        match self.respond(command, true) {
            (_, MockCommandResult::Missing) => Err(ExecError::not_found(command.program())),
            (_, MockCommandResult::Exited { exit_code, output }) => Ok(CapturedOutput {
                exit_code: Some(exit_code),
                output,
            }),
        }
    }
}
