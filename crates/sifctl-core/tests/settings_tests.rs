//! Integration tests for settings file discovery
//!
//! Tests cover:
//! - Explicit paths (present and missing)
//! - The SIFCTL_SETTINGS override
//! - Falling back to empty settings when no default file exists

use camino::Utf8PathBuf;
use serial_test::serial;
use sifctl_core::{Error, SystemSettings, SETTINGS_ENV_VAR};
use std::fs;

fn write_settings(dir: &tempfile::TempDir, content: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(dir.path().join("settings.yaml")).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_load_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(
        &dir,
        "platforms:\n  singularity:\n    singularity: /usr/local/bin/singularity\n",
    );

    let settings = SystemSettings::load(Some(&path)).unwrap();
    assert_eq!(
        settings.executable("singularity"),
        Some("/usr/local/bin/singularity")
    );
    assert_eq!(settings.path.as_deref(), Some(path.as_path()));
}

#[test]
#[serial]
fn test_load_explicit_missing_path_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.yaml")).unwrap();

    let err = SystemSettings::load(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound { .. }));
}

#[test]
#[serial]
fn test_env_override_takes_precedence_over_home() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(
        &dir,
        "platforms:\n  singularity:\n    singularity: apptainer\n",
    );

    std::env::set_var(SETTINGS_ENV_VAR, path.as_str());
    let result = SystemSettings::load(None);
    std::env::remove_var(SETTINGS_ENV_VAR);

    let settings = result.unwrap();
    assert_eq!(settings.executable("singularity"), Some("apptainer"));
}

#[test]
#[serial]
fn test_missing_default_file_gives_empty_settings() {
    let home = tempfile::tempdir().unwrap();
    let previous_home = std::env::var("HOME").ok();

    std::env::remove_var(SETTINGS_ENV_VAR);
    std::env::set_var("HOME", home.path());
    let result = SystemSettings::load(None);
    if let Some(previous) = previous_home {
        std::env::set_var("HOME", previous);
    }

    let settings = result.unwrap();
    assert!(settings.path.is_none());
    assert_eq!(settings.executable("singularity"), None);
}

#[test]
#[serial]
fn test_default_file_under_home_is_read() {
    let home = tempfile::tempdir().unwrap();
    let previous_home = std::env::var("HOME").ok();
    fs::create_dir_all(home.path().join(".sifctl")).unwrap();
    fs::write(
        home.path().join(".sifctl").join("settings.yaml"),
        "timeouts:\n  http_secs: 7\n",
    )
    .unwrap();

    std::env::remove_var(SETTINGS_ENV_VAR);
    std::env::set_var("HOME", home.path());
    let result = SystemSettings::load(None);
    if let Some(previous) = previous_home {
        std::env::set_var("HOME", previous);
    }

    let settings = result.unwrap();
    assert_eq!(settings.timeouts().http_secs, 7);
    assert!(settings.path.is_some());
}
