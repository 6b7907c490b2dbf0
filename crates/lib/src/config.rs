//! Environment-driven defaults.
//!
//! Command-line flags take precedence over these; these take precedence over
//! the built-in defaults in [`crate::consts`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::{DEFAULT_PROJECT_NAME, DEFAULT_SIZE_THRESHOLD, DEFAULT_TARGET_DIR_NAME};

pub const TARGET_DIR_ENV: &str = "CMKPROJ_TARGET_DIR";
pub const SIZE_THRESHOLD_ENV: &str = "CMKPROJ_SIZE_THRESHOLD";
pub const PROJECT_NAME_ENV: &str = "CMKPROJ_PROJECT_NAME";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{var} must be a whole number of bytes, got '{value}'")]
  InvalidThreshold { var: &'static str, value: String },

  #[error("failed to determine the working directory: {0}")]
  CurrentDir(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  /// Working directory relative entries and the target are resolved against.
  pub base_dir: PathBuf,
  pub target_root: PathBuf,
  pub size_threshold: u64,
  pub project_name: String,
}

impl Settings {
  /// Settings for the process working directory.
  pub fn current() -> Result<Self, ConfigError> {
    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    Self::for_dir(&cwd)
  }

  /// Settings for `base_dir`, with environment overrides applied.
  pub fn for_dir(base_dir: &Path) -> Result<Self, ConfigError> {
    let target_root = match std::env::var_os(TARGET_DIR_ENV) {
      Some(dir) if !dir.is_empty() => base_dir.join(dir),
      _ => Self::default_target_root(base_dir),
    };

    let size_threshold = match std::env::var(SIZE_THRESHOLD_ENV) {
      Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidThreshold {
        var: SIZE_THRESHOLD_ENV,
        value,
      })?,
      Err(_) => DEFAULT_SIZE_THRESHOLD,
    };

    let project_name = std::env::var(PROJECT_NAME_ENV)
      .ok()
      .filter(|name| !name.is_empty())
      .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

    Ok(Self {
      base_dir: base_dir.to_path_buf(),
      target_root,
      size_threshold,
      project_name,
    })
  }

  pub fn default_target_root(base_dir: &Path) -> PathBuf {
    base_dir.join(DEFAULT_TARGET_DIR_NAME)
  }
}
