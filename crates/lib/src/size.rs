//! Advisory size guard.
//!
//! Sizes are measured before copying so oversized entries can be reported.
//! The result never blocks a copy.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum SizeError {
  #[error("failed to read metadata for {}: {source}", path.display())]
  Metadata {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to traverse directory {}: {source}", path.display())]
  WalkDir {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeReport {
  pub bytes: u64,
  pub exceeds_threshold: bool,
}

impl SizeReport {
  /// Size in whole kilobytes, as shown in progress output.
  pub fn kilobytes(&self) -> u64 {
    kilobytes(self.bytes)
  }
}

/// Whole kilobytes of 1000 bytes, rounded down.
pub fn kilobytes(bytes: u64) -> u64 {
  bytes / 1000
}

/// Total bytes occupied by `path`.
///
/// A file reports its own length. A directory reports the sum of all regular
/// files below it; symbolic links are neither counted nor followed.
pub fn total_size(path: &Path) -> Result<u64, SizeError> {
  let metadata = fs::metadata(path).map_err(|e| SizeError::Metadata {
    path: path.to_path_buf(),
    source: e,
  })?;

  if !metadata.is_dir() {
    return Ok(metadata.len());
  }

  let mut total = 0;
  for entry in WalkDir::new(path) {
    let entry = entry.map_err(|e| SizeError::WalkDir {
      path: path.to_path_buf(),
      source: e,
    })?;

    if !entry.file_type().is_file() {
      continue;
    }

    let metadata = entry.metadata().map_err(|e| SizeError::WalkDir {
      path: path.to_path_buf(),
      source: e,
    })?;
    total += metadata.len();
  }

  Ok(total)
}

/// Measure `path` and flag it when it is strictly larger than `threshold`.
pub fn measure(path: &Path, threshold: u64) -> Result<SizeReport, SizeError> {
  let bytes = total_size(path)?;
  Ok(SizeReport {
    bytes,
    exceeds_threshold: bytes > threshold,
  })
}
