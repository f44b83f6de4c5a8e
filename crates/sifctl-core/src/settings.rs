//! System settings file loading and parsing
//!
//! The settings file tells sifctl where the container runtime lives when it
//! is not one of the well-known invocations, and how long external calls may
//! take:
//!
//! ```yaml
//! platforms:
//!   singularity:
//!     singularity: sudo /opt/apptainer/bin/apptainer
//! timeouts:
//!   command_secs: 0
//!   http_secs: 30
//! ```

use crate::error::{Error, Result};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;
use tracing::debug;

/// Environment variable naming an alternative settings file
pub const SETTINGS_ENV_VAR: &str = "SIFCTL_SETTINGS";

/// Settings directory below the home directory
const SETTINGS_DIR: &str = ".sifctl";

/// Settings file name
const SETTINGS_FILE: &str = "settings.yaml";

/// Default HTTP timeout in seconds
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Parsed settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    /// Per-platform settings, keyed by platform name
    pub platforms: BTreeMap<String, BTreeMap<String, serde_yaml_ng::Value>>,

    /// Time budgets for external calls
    pub timeouts: TimeoutSettings,
}

/// Time budgets for external calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
    /// Seconds a runtime invocation may take; 0 means unbounded
    pub command_secs: u64,

    /// Seconds a registry request may take
    pub http_secs: u64,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            command_secs: 0,
            http_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl TimeoutSettings {
    /// Timeout for runtime invocations, `None` when unbounded
    pub fn command_timeout(&self) -> Option<Duration> {
        (self.command_secs > 0).then(|| Duration::from_secs(self.command_secs))
    }

    /// Timeout for registry requests
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_secs)
    }
}

/// Loaded system settings together with where they came from
#[derive(Debug, Clone, Default)]
pub struct SystemSettings {
    /// The parsed settings
    pub settings: SettingsFile,

    /// Path of the file the settings were read from, if any
    pub path: Option<Utf8PathBuf>,
}

impl SystemSettings {
    /// Load settings from `path`, or from the default location.
    ///
    /// An explicit path (argument or `SIFCTL_SETTINGS`) must exist. A missing
    /// file at the default location yields empty settings.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        if let Some(p) = path {
            return Self::load_file(p);
        }

        if let Ok(env_path) = std::env::var(SETTINGS_ENV_VAR) {
            if !env_path.trim().is_empty() {
                return Self::load_file(Utf8Path::new(env_path.trim()));
            }
        }

        let default_path = Self::default_path()?;
        if !default_path.exists() {
            debug!(
                "No settings file at {}, using built-in defaults",
                default_path
            );
            return Ok(Self::default());
        }
        Self::load_file(&default_path)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: SettingsFile = if content.trim().is_empty() {
            SettingsFile::default()
        } else {
            serde_yaml_ng::from_str(content)?
        };
        Ok(Self {
            settings,
            path: None,
        })
    }

    /// Default settings file location (`$HOME/.sifctl/settings.yaml`)
    pub fn default_path() -> Result<Utf8PathBuf> {
        let home = get_home_dir()?;
        let home = Utf8PathBuf::from_path_buf(home).map_err(|p| {
            Error::invalid_config(format!("home directory is not UTF-8: {}", p.display()))
        })?;
        Ok(home.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    fn load_file(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        let mut loaded = Self::from_yaml(&content)?;
        loaded.path = Some(path.to_owned());
        debug!("Loaded settings from {}", path);
        Ok(loaded)
    }

    /// Settings block for `platform`
    pub fn platform(&self, platform: &str) -> Option<&BTreeMap<String, serde_yaml_ng::Value>> {
        self.settings.platforms.get(platform)
    }

    /// Executable configured for `platform`.
    ///
    /// The executable lives under the key named after the platform itself
    /// (`platforms.singularity.singularity`). Blank values count as absent.
    pub fn executable(&self, platform: &str) -> Option<&str> {
        self.platform(platform)?
            .get(platform)?
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn timeouts(&self) -> &TimeoutSettings {
        &self.settings.timeouts
    }
}
