//! Copying of descriptor entries into the target tree.
//!
//! Destinations are replaced, never merged: an existing destination directory
//! or file is removed before the copy. Files keep their permissions and
//! timestamps, so a read-only source yields a read-only copy.

use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum CopyError {
  #[error("source {} is not a directory", path.display())]
  NotADirectory { path: PathBuf },

  #[error("source {} is not a file", path.display())]
  NotAFile { path: PathBuf },

  #[error("failed to remove existing {}: {source}", path.display())]
  Remove {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  CopyFile {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to preserve timestamps on {}: {source}", path.display())]
  Timestamps {
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

/// Copy the directory `src` to `dst`, replacing `dst` if it exists.
///
/// Symbolic links inside `src` are followed and their targets copied.
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, CopyError> {
  if !src.is_dir() {
    return Err(CopyError::NotADirectory { path: src.to_path_buf() });
  }

  remove_existing(dst)?;

  let mut files = 0;
  for entry in WalkDir::new(src).follow_links(true) {
    let entry = entry.map_err(|e| CopyError::WalkDir {
      path: src.to_path_buf(),
      source: e,
    })?;

    let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
    let target = dst.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&target).map_err(|e| CopyError::CreateDir {
        path: target.clone(),
        source: e,
      })?;
    } else if entry.file_type().is_file() {
      copy_with_metadata(entry.path(), &target)?;
      files += 1;
    } else {
      trace!(path = %entry.path().display(), "skipping special file");
    }
  }

  debug!(from = %src.display(), to = %dst.display(), files, "copied directory");
  Ok(files)
}

/// Copy the single file `src` to `dst`, creating parent directories and
/// replacing any existing file, read-only or not.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), CopyError> {
  if !src.is_file() {
    return Err(CopyError::NotAFile { path: src.to_path_buf() });
  }

  if let Some(parent) = dst.parent() {
    fs::create_dir_all(parent).map_err(|e| CopyError::CreateDir {
      path: parent.to_path_buf(),
      source: e,
    })?;
  }

  remove_existing(dst)?;

  copy_with_metadata(src, dst)?;
  debug!(from = %src.display(), to = %dst.display(), "copied file");
  Ok(())
}

fn remove_existing(path: &Path) -> Result<(), CopyError> {
  let Ok(metadata) = path.symlink_metadata() else {
    return Ok(());
  };

  let result = if metadata.is_dir() {
    fs::remove_dir_all(path)
  } else {
    fs::remove_file(path)
  };

  result.map_err(|e| CopyError::Remove {
    path: path.to_path_buf(),
    source: e,
  })?;
  debug!(path = %path.display(), "removed existing destination");
  Ok(())
}

/// `fs::copy` carries permissions over; access and modification times are
/// applied afterwards.
fn copy_with_metadata(src: &Path, dst: &Path) -> Result<(), CopyError> {
  fs::copy(src, dst).map_err(|e| CopyError::CopyFile {
    from: src.to_path_buf(),
    to: dst.to_path_buf(),
    source: e,
  })?;

  let timestamps = |e| CopyError::Timestamps {
    path: dst.to_path_buf(),
    source: e,
  };

  let metadata = fs::metadata(src).map_err(timestamps)?;
  let mut times = FileTimes::new().set_modified(metadata.modified().map_err(timestamps)?);
  if let Ok(accessed) = metadata.accessed() {
    times = times.set_accessed(accessed);
  }

  // A copy of a read-only file cannot be opened for writing.
  let file = File::options().write(true).open(dst).or_else(|_| File::open(dst)).map_err(timestamps)?;
  file.set_times(times).map_err(timestamps)?;

  Ok(())
}
