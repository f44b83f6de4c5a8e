//! # sifctl-core
//!
//! Core library for sifctl providing:
//! - System settings loading (`~/.sifctl/settings.yaml`)
//! - The process execution primitive used to drive container runtimes
//! - Shared error types

pub mod error;
pub mod exec;
pub mod settings;
pub mod utils;

pub use error::{Error, ExecError, Result};
pub use exec::{CapturedOutput, CommandLine, DuctRunner, ProcessRunner};
pub use settings::{SettingsFile, SystemSettings, TimeoutSettings, SETTINGS_ENV_VAR};
pub use utils::get_home_dir;
