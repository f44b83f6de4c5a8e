//! Singularity / Apptainer runtime client
//!
//! A [`RuntimeClient`] owns the command prefix used to invoke the runtime and
//! the version resolved from its `--version` banner. The version decides
//! which features may be used (see [`RuntimeClient::supports_fakeroot`]).
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --init()--> Ready(Version)
//!       |                      |  ^
//!       |                      |  | init(force = true)
//!       +--------init()--------+--+--> Failed(reason)
//! ```
//!
//! `build` and `run` refuse to operate unless the client is `Ready`.

use crate::error::{Result, RuntimeError};
use crate::executable::Executable;
use crate::image::{ImageSpec, RecipeSource};
use crate::version::{Runtime, Version};
use sifctl_core::{CommandLine, ProcessRunner};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Version resolution state of a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientState {
    /// No version probe has run yet
    Uninitialized,
    /// Version resolved; the client may build and run
    Ready(Version),
    /// The last version probe failed
    Failed(String),
}

impl ClientState {
    pub fn version(&self) -> Option<&Version> {
        match self {
            Self::Ready(version) => Some(version),
            _ => None,
        }
    }
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("uninitialized"),
            Self::Ready(version) => write!(f, "ready ({})", version),
            Self::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Result of a build request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The runtime built a new image at this path
    Built(PathBuf),
    /// An image already existed at this path; nothing was run
    AlreadyExists(PathBuf),
}

impl BuildOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Built(path) | Self::AlreadyExists(path) => path,
        }
    }
}

/// Client for a Singularity-family container runtime
pub struct RuntimeClient {
    executable: Executable,
    state: ClientState,
    runner: Arc<dyn ProcessRunner>,
}

impl fmt::Debug for RuntimeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeClient")
            .field("executable", &self.executable)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl RuntimeClient {
    /// Create a client and resolve its version immediately
    pub fn new(executable: impl Into<Executable>, runner: Arc<dyn ProcessRunner>) -> Result<Self> {
        let mut client = Self::unresolved(executable, runner);
        client.init(false)?;
        debug!(
            "Runtime client ready (exec={}, state={})",
            client.executable, client.state
        );
        Ok(client)
    }

    /// Create a client with a known version; no process is spawned
    pub fn with_version(
        executable: impl Into<Executable>,
        version: Version,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            executable: executable.into(),
            state: ClientState::Ready(version),
            runner,
        }
    }

    /// Create a client whose version is resolved on the first [`init`](Self::init)
    pub fn unresolved(executable: impl Into<Executable>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            executable: executable.into(),
            state: ClientState::Uninitialized,
            runner,
        }
    }

    pub fn executable(&self) -> &Executable {
        &self.executable
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Resolved version, if the client is ready
    pub fn version(&self) -> Option<&Version> {
        self.state.version()
    }

    /// Resolve the runtime version by running `<exe> --version`.
    ///
    /// A ready client is left alone unless `force` is set. A failed client
    /// stays failed unless `force` is set.
    pub fn init(&mut self, force: bool) -> Result<&Version> {
        let needs_probe = match &self.state {
            ClientState::Ready(_) => force,
            ClientState::Failed(_) if !force => {
                return Err(RuntimeError::not_ready(self.state.to_string()));
            }
            _ => true,
        };

        if needs_probe {
            match self.probe_version() {
                Ok(version) => {
                    debug!("Runtime client version={}", version);
                    self.state = ClientState::Ready(version);
                }
                Err(err) => {
                    self.state = ClientState::Failed(err.to_string());
                    return Err(err);
                }
            }
        }

        match &self.state {
            ClientState::Ready(version) => Ok(version),
            other => Err(RuntimeError::not_ready(other.to_string())),
        }
    }

    fn probe_version(&self) -> Result<Version> {
        let command = self.command()?.arg("--version");
        let captured = self.runner.run_and_capture(&command)?;
        if !captured.success() {
            return Err(RuntimeError::VersionProbeFailed {
                command: command.to_string(),
                exit_code: captured.exit_code,
                output: captured.output,
            });
        }
        Version::parse(&captured.output)
    }

    fn command(&self) -> Result<CommandLine> {
        self.executable
            .command()
            .ok_or(RuntimeError::EmptyExecutable)
    }

    fn ready_version(&self) -> Result<&Version> {
        self.state
            .version()
            .ok_or_else(|| RuntimeError::not_ready(self.state.to_string()))
    }

    /// Whether the runtime can run containers with `--fakeroot`.
    ///
    /// Singularity gained unprivileged fakeroot in 3.5.0; every Apptainer
    /// release supports it. A client without a resolved version reports
    /// `false`.
    pub fn supports_fakeroot(&self) -> bool {
        match self.version() {
            Some(version) => match version.runtime {
                Runtime::Apptainer => true,
                Runtime::Singularity => version.is_at_least(Runtime::Singularity, 3, 5, 0),
                Runtime::Unknown => false,
            },
            None => false,
        }
    }

    /// Build `image_dir/image_name` from `recipe`.
    ///
    /// An existing image is never overwritten: the call returns
    /// [`BuildOutcome::AlreadyExists`] without running anything. `recipe` is
    /// either a `docker://` / `docker-archive:` reference or a definition
    /// file relative to `build_dir`, which must exist. The runtime runs with
    /// `build_dir` as its working directory.
    pub fn build(
        &self,
        build_dir: impl AsRef<Path>,
        recipe: &str,
        image_dir: impl AsRef<Path>,
        image_name: &str,
        build_args: &[String],
    ) -> Result<BuildOutcome> {
        self.ready_version()?;
        let build_dir = build_dir.as_ref();
        let image_file = image_dir.as_ref().join(image_name);

        if image_file.exists() {
            info!(
                "Not building SIF image, file exists: {}",
                image_file.display()
            );
            return Ok(BuildOutcome::AlreadyExists(image_file));
        }

        if let Some(parent) = image_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let image_file = std::path::absolute(&image_file)?;

        match RecipeSource::classify(recipe) {
            RecipeSource::Remote => {
                info!("Building SIF image from docker image: {}", recipe);
            }
            RecipeSource::File => {
                if !build_dir.join(recipe).exists() {
                    return Err(RuntimeError::missing_recipe(build_dir, recipe));
                }
                info!(
                    "Building SIF image from recipe file (path={}, file={})",
                    build_dir.display(),
                    recipe
                );
            }
        }

        let command = self
            .command()?
            .arg("build")
            .args(non_blank(build_args))
            .arg(image_file.to_string_lossy())
            .arg(recipe)
            .current_dir(build_dir);

        self.runner
            .run(&command)
            .map_err(|source| RuntimeError::BuildFailed { source })?;

        Ok(BuildOutcome::Built(image_file))
    }

    /// Run a container.
    ///
    /// Without `entrypoint` this is `<exe> run <run_args> <volumes> <image> <args>`;
    /// with one it is `<exe> exec <run_args> <volumes> <image> <entrypoint> <args>`.
    /// Every element of `args` reaches the container as a single argument.
    pub fn run(
        &self,
        run_args: &[String],
        volumes: &[String],
        image_file: &str,
        args: &[String],
        entrypoint: Option<&str>,
    ) -> Result<()> {
        self.ready_version()?;

        let subcommand = if entrypoint.is_some() { "exec" } else { "run" };
        let mut command = self
            .command()?
            .arg(subcommand)
            .args(non_blank(run_args))
            .args(non_blank(volumes))
            .arg(image_file);
        if let Some(entrypoint) = entrypoint {
            command = command.arg(entrypoint);
        }
        let command = command.args(args.iter().cloned());

        self.runner
            .run(&command)
            .map_err(|source| RuntimeError::RunFailed { source })
    }

    /// Classify an image reference or local file.
    ///
    /// Local files are inspected with `<exe> sif header`; anything the
    /// runtime does not accept as SIF is [`ImageSpec::Other`].
    pub fn image_spec(&self, uri: &str) -> ImageSpec {
        if let Some(spec) = ImageSpec::from_scheme(uri) {
            return spec;
        }

        if !Path::new(uri).is_file() {
            warn!("Image URI ({}) is not a file, can't identify image spec", uri);
            return ImageSpec::Other;
        }

        let command = match self.command() {
            Ok(command) => command.args(["sif", "header", uri]),
            Err(err) => {
                warn!("Can't inspect {}: {}", uri, err);
                return ImageSpec::Other;
            }
        };

        match self.runner.run_and_capture(&command) {
            Ok(captured) if captured.success() => ImageSpec::SingularityImageFile,
            Ok(captured) => {
                debug!(
                    "{} is not a SIF file (`{}` exited with {:?})",
                    uri, command, captured.exit_code
                );
                ImageSpec::Other
            }
            Err(err) => {
                warn!("Failed to inspect {}: {}", uri, err);
                ImageSpec::Other
            }
        }
    }
}

/// Skip blank tokens in option lists (an unset `--bind` or build flag)
fn non_blank(tokens: &[String]) -> impl Iterator<Item = String> + '_ {
    tokens
        .iter()
        .filter(|t| !t.trim().is_empty())
        .cloned()
}
