//! Process execution primitive
//!
//! Everything sifctl does to a container runtime goes through the
//! [`ProcessRunner`] trait, so the runtime crate never touches
//! `std::process` directly and tests can substitute a scripted runner.
//!
//! Commands are structured argument vectors. No shell is involved, so an
//! argument containing spaces or shell metacharacters reaches the child
//! process as exactly one argument.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::ExecError;

/// Polling interval while waiting on a child with a deadline
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A program invocation: program, arguments, and optional working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandLine {
    /// Create a command line for `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Build a command line from a token list (`["sudo", "apptainer", "--version"]`).
    ///
    /// Returns `None` for an empty list.
    pub fn from_tokens<I, S>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = tokens.into_iter().map(Into::into);
        let program = iter.next()?;
        Some(Self {
            program,
            args: iter.collect(),
            cwd: None,
        })
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the process in `dir`
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Program followed by its arguments
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(dir) = &self.cwd {
            write!(f, "(in {}) ", dir.display())?;
        }
        let rendered: Vec<String> = self.tokens().map(quote_for_display).collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// Quote a token for log output only; nothing is ever handed to a shell
fn quote_for_display(token: &str) -> String {
    if token.is_empty() {
        "''".to_string()
    } else if token
        .chars()
        .any(|c| c.is_whitespace() || "'\"$`\\;&|<>()*?".contains(c))
    {
        format!("'{}'", token.replace('\'', r"'\''"))
    } else {
        token.to_string()
    }
}

/// Exit code and merged stdout/stderr text of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Standard output with standard error interleaved
    pub output: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Process execution primitive consumed by the runtime client
pub trait ProcessRunner: Send + Sync {
    /// Run a command with inherited stdio. A non-zero exit is an error.
    fn run(&self, command: &CommandLine) -> Result<(), ExecError>;

    /// Run a command capturing merged stdout/stderr.
    ///
    /// A non-zero exit is reported through [`CapturedOutput::exit_code`],
    /// not as an error; only a failure to launch (or a timeout) is an error.
    fn run_and_capture(&self, command: &CommandLine) -> Result<CapturedOutput, ExecError>;
}

/// [`ProcessRunner`] backed by `duct`
#[derive(Debug, Clone, Default)]
pub struct DuctRunner {
    /// Upper bound for a single invocation; `None` waits indefinitely
    timeout: Option<Duration>,
}

impl DuctRunner {
    /// Create a runner without a timeout
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Create a runner that kills invocations exceeding `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Get the configured timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn expression(&self, command: &CommandLine) -> Result<duct::Expression, ExecError> {
        let program = which::which(command.program())
            .map_err(|_| ExecError::not_found(command.program()))?;
        let args: Vec<OsString> = command.get_args().iter().map(OsString::from).collect();
        let mut expr = duct::cmd(program, args).unchecked();
        if let Some(dir) = command.cwd() {
            expr = expr.dir(dir);
        }
        Ok(expr)
    }

    fn finish(
        &self,
        command: &CommandLine,
        expr: duct::Expression,
    ) -> Result<std::process::Output, ExecError> {
        let rendered = command.to_string();
        debug!("Running: {}", rendered);

        let handle = expr
            .start()
            .map_err(|e| ExecError::launch(rendered.clone(), e))?;

        let Some(timeout) = self.timeout else {
            return handle
                .wait()
                .cloned()
                .map_err(|e| ExecError::launch(rendered, e));
        };

        let deadline = Instant::now() + timeout;
        loop {
            match handle.try_wait() {
                Ok(Some(output)) => return Ok(output.clone()),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = handle.kill();
                    return Err(ExecError::TimedOut {
                        command: rendered,
                        timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(ExecError::launch(rendered, e)),
            }
        }
    }
}

impl ProcessRunner for DuctRunner {
    fn run(&self, command: &CommandLine) -> Result<(), ExecError> {
        let expr = self.expression(command)?;
        let output = self.finish(command, expr)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ExecError::non_zero_exit(
                command.to_string(),
                output.status.code(),
                None,
            ))
        }
    }

    fn run_and_capture(&self, command: &CommandLine) -> Result<CapturedOutput, ExecError> {
        let expr = self
            .expression(command)?
            .stderr_to_stdout()
            .stdout_capture();
        let output = self.finish(command, expr)?;
        Ok(CapturedOutput {
            exit_code: output.status.code(),
            output: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
