//! Runtime client discovery
//!
//! Tries candidate invocations one at a time, in order, and returns the first
//! one whose `--version` probe succeeds and parses. Candidates are probed
//! sequentially, each at most once; `sudo` variants come after their
//! unprivileged counterparts.

use crate::client::RuntimeClient;
use crate::error::{Result, RuntimeError};
use crate::executable::Executable;
use sifctl_core::{ProcessRunner, SystemSettings};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Platform key under which the settings file names an executable
pub const SETTINGS_PLATFORM: &str = "singularity";

/// Well-known invocations, tried after any configured executable
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "singularity",
    "sudo singularity",
    "apptainer",
    "sudo apptainer",
];

/// Ordered search over candidate runtime invocations
pub struct ClientDiscovery {
    candidates: Vec<Executable>,
    runner: Arc<dyn ProcessRunner>,
}

impl ClientDiscovery {
    /// Discovery over the default candidates
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self::with_candidates(DEFAULT_CANDIDATES.iter().map(|c| Executable::parse(c)), runner)
    }

    /// Discovery over the default candidates, preceded by the executable
    /// configured in `settings` (if any)
    pub fn from_settings(settings: &SystemSettings, runner: Arc<dyn ProcessRunner>) -> Self {
        let mut discovery = Self::new(runner);
        if let Some(configured) = settings.executable(SETTINGS_PLATFORM) {
            info!(
                "Found {} platform config in settings file ({}), trying `{}` first",
                SETTINGS_PLATFORM,
                settings
                    .path
                    .as_ref()
                    .map(|p| p.as_str())
                    .unwrap_or("<inline>"),
                configured
            );
            discovery
                .candidates
                .insert(0, Executable::parse(configured));
        }
        discovery
    }

    /// Discovery over an explicit candidate list
    pub fn with_candidates<I>(candidates: I, runner: Arc<dyn ProcessRunner>) -> Self
    where
        I: IntoIterator<Item = Executable>,
    {
        Self {
            candidates: candidates.into_iter().collect(),
            runner,
        }
    }

    pub fn candidates(&self) -> &[Executable] {
        &self.candidates
    }

    /// Return a ready client for the first candidate that initializes.
    ///
    /// Each candidate is tried exactly once. If none works the error lists
    /// every candidate in the order tried.
    pub fn discover(&self) -> Result<RuntimeClient> {
        debug!(
            "Trying candidate executables in order (first available wins): {}",
            self.candidates
                .iter()
                .map(|c| format!("`{}`", c))
                .collect::<Vec<_>>()
                .join(", ")
        );

        for candidate in &self.candidates {
            match RuntimeClient::new(candidate.clone(), Arc::clone(&self.runner)) {
                Ok(client) => {
                    if let Some(version) = client.version() {
                        info!("Found container runtime (exec={}, version={})", candidate, version);
                    }
                    return Ok(client);
                }
                Err(err) => {
                    warn!("Failed to run container runtime as `{}`: {}", candidate, err);
                }
            }
        }

        Err(RuntimeError::discovery_failed(
            self.candidates.iter().map(ToString::to_string),
        ))
    }
}

/// Discover a runtime client using the settings file and default candidates
pub fn discover(settings: &SystemSettings, runner: Arc<dyn ProcessRunner>) -> Result<RuntimeClient> {
    ClientDiscovery::from_settings(settings, runner).discover()
}
