//! CLI command implementations

pub mod build;
pub mod detect;
pub mod inspect;
pub mod manifest;
pub mod run;
pub mod version;

use anyhow::{Context, Result};
use camino::Utf8Path;
use sifctl_core::{DuctRunner, ProcessRunner, SystemSettings};
use sifctl_runtime::RuntimeClient;
use std::sync::Arc;
use tracing::debug;

/// Load settings from `--settings`, `$SIFCTL_SETTINGS`, or the default location
pub(crate) fn load_settings(path: Option<&Utf8Path>) -> Result<SystemSettings> {
    let settings = SystemSettings::load(path).context("Failed to load system settings")?;
    match &settings.path {
        Some(path) => debug!("Loaded settings from {}", path),
        None => debug!("No settings file found, using defaults"),
    }
    Ok(settings)
}

/// Process runner honouring the configured command timeout
pub(crate) fn process_runner(settings: &SystemSettings) -> Arc<dyn ProcessRunner> {
    match settings.timeouts().command_timeout() {
        Some(timeout) => Arc::new(DuctRunner::with_timeout(timeout)),
        None => Arc::new(DuctRunner::new()),
    }
}

/// Discover a ready runtime client
pub(crate) fn discover_client(settings: &SystemSettings) -> Result<RuntimeClient> {
    let client = sifctl_runtime::discover(settings, process_runner(settings))?;
    Ok(client)
}
