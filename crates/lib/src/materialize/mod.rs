//! Materialization of a standalone project from a build descriptor.
//!
//! Materializing runs in two steps:
//!
//! 1. [`plan`] resolves every entry, measures it and computes where it will be
//!    copied. Nothing under the target root is touched, so a bad entry fails
//!    before any copy begins.
//! 2. [`apply`] copies the planned entries in order (include directories, then
//!    sources) and writes the rewritten descriptor.
//!
//! # Target layout
//!
//! ```text
//! <target>/
//! ├── CMakeLists.txt
//! ├── include/<entry without first segment>/...
//! └── src/<entry without first segment>
//! ```
//!
//! Failures abort the run and name the entry. Entries copied before the
//! failure stay in place.

mod types;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::{DESCRIPTOR_FILENAME, INCLUDE_SUBDIR, SOURCE_SUBDIR};
use crate::copy::{CopyError, copy_file, copy_tree};
use crate::descriptor::emit::{EmitError, validate_project_name, write_descriptor};
use crate::descriptor::{BuildDescriptor, DescriptorError, Layout, ParseError, parse_file};
use crate::paths::{PathError, strip_first_segment};
use crate::size::{SizeError, measure};

pub use types::*;

#[derive(Debug, Error)]
pub enum MaterializeError {
  #[error("failed to parse descriptor {}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: ParseError,
  },

  #[error("invalid descriptor {}", path.display())]
  Invalid {
    path: PathBuf,
    #[source]
    source: DescriptorError,
  },

  #[error("cannot place {kind} '{entry}'")]
  Destination {
    kind: EntryKind,
    entry: String,
    #[source]
    source: PathError,
  },

  #[error("cannot measure {kind} '{entry}'")]
  Measure {
    kind: EntryKind,
    entry: String,
    #[source]
    source: SizeError,
  },

  #[error("{kind} '{entry}' is not a {}", kind.expected())]
  KindMismatch { kind: EntryKind, entry: String },

  #[error("failed to copy {kind} '{entry}'")]
  Copy {
    kind: EntryKind,
    entry: String,
    #[source]
    source: CopyError,
  },

  #[error("failed to create target directory {}: {source}", path.display())]
  CreateTarget {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Emit(#[from] EmitError),
}

/// Resolve, measure and place every entry of `descriptor`.
pub fn plan(descriptor: &BuildDescriptor, options: &MaterializeOptions) -> Result<Plan, MaterializeError> {
  validate_project_name(&options.project_name)?;

  let include_root = options.target_root.join(INCLUDE_SUBDIR);
  let source_root = options.target_root.join(SOURCE_SUBDIR);

  let includes = descriptor
    .include_directories()
    .iter()
    .map(|entry| (EntryKind::IncludeDirectory, entry, &include_root, INCLUDE_SUBDIR));
  let sources = descriptor
    .sources()
    .iter()
    .map(|entry| (EntryKind::SourceFile, entry, &source_root, SOURCE_SUBDIR));

  let mut entries = Vec::new();
  let mut destinations = HashSet::new();

  for (kind, entry, root, subdir) in includes.chain(sources) {
    let rewritten = strip_first_segment(entry).map_err(|e| MaterializeError::Destination {
      kind,
      entry: entry.clone(),
      source: e,
    })?;

    let source = options.base_dir.join(entry);
    let size = measure(&source, options.size_threshold).map_err(|e| MaterializeError::Measure {
      kind,
      entry: entry.clone(),
      source: e,
    })?;

    let found = match kind {
      EntryKind::IncludeDirectory => source.is_dir(),
      EntryKind::SourceFile => source.is_file(),
    };
    if !found {
      return Err(MaterializeError::KindMismatch {
        kind,
        entry: entry.clone(),
      });
    }

    let destination = root.join(&rewritten);
    if !destinations.insert(destination.clone()) {
      warn!(
        entry = %entry,
        destination = %destination.display(),
        "destination shared with an earlier entry, the later copy replaces it"
      );
    }

    debug!(entry = %entry, bytes = size.bytes, destination = %destination.display(), "planned copy");

    entries.push(PlannedCopy {
      kind,
      entry: entry.clone(),
      source,
      destination,
      emitted_path: format!("{}/{}", subdir, rewritten),
      size,
    });
  }

  Ok(Plan {
    target_root: options.target_root.clone(),
    descriptor_path: options.target_root.join(DESCRIPTOR_FILENAME),
    minimum_version: descriptor.minimum_version().to_string(),
    project_name: options.project_name.clone(),
    layout: options.layout,
    size_threshold: options.size_threshold,
    entries,
  })
}

/// Carry out `plan`. `progress` is called before each entry is copied.
pub fn apply(plan: &Plan, mut progress: impl FnMut(&PlannedCopy)) -> Result<MaterializeResult, MaterializeError> {
  create_dir(&plan.target_root)?;
  create_dir(&plan.target_root.join(INCLUDE_SUBDIR))?;
  if plan.layout == Layout::Executable {
    create_dir(&plan.target_root.join(SOURCE_SUBDIR))?;
  }

  let mut result = MaterializeResult {
    target_root: plan.target_root.clone(),
    descriptor_path: plan.descriptor_path.clone(),
    directories_copied: 0,
    files_copied: 0,
    bytes_copied: 0,
  };

  for planned in &plan.entries {
    if planned.size.exceeds_threshold {
      warn!(
        entry = %planned.entry,
        bytes = planned.size.bytes,
        threshold = plan.size_threshold,
        "copying large {}",
        planned.kind
      );
    }

    progress(planned);

    let copied = match planned.kind {
      EntryKind::IncludeDirectory => copy_tree(&planned.source, &planned.destination).map(|files| {
        result.directories_copied += 1;
        result.files_copied += files;
      }),
      EntryKind::SourceFile => copy_file(&planned.source, &planned.destination).map(|()| {
        result.files_copied += 1;
      }),
    };
    copied.map_err(|e| MaterializeError::Copy {
      kind: planned.kind,
      entry: planned.entry.clone(),
      source: e,
    })?;

    result.bytes_copied += planned.size.bytes;
  }

  write_descriptor(&plan.target_root, &plan.emit_input())?;

  info!(
    target = %plan.target_root.display(),
    directories = result.directories_copied,
    files = result.files_copied,
    bytes = result.bytes_copied,
    "materialization complete"
  );

  Ok(result)
}

/// Plan and apply in one go.
pub fn materialize(
  descriptor: &BuildDescriptor,
  options: &MaterializeOptions,
  progress: impl FnMut(&PlannedCopy),
) -> Result<MaterializeResult, MaterializeError> {
  let plan = plan(descriptor, options)?;
  apply(&plan, progress)
}

/// Parse the descriptor file at `path` and validate it for `layout`.
pub fn load_descriptor(path: &Path, layout: Layout) -> Result<BuildDescriptor, MaterializeError> {
  let raw = parse_file(path).map_err(|e| MaterializeError::Parse {
    path: path.to_path_buf(),
    source: e,
  })?;

  BuildDescriptor::validate(raw, layout).map_err(|e| MaterializeError::Invalid {
    path: path.to_path_buf(),
    source: e,
  })
}

fn create_dir(path: &Path) -> Result<(), MaterializeError> {
  fs::create_dir_all(path).map_err(|e| MaterializeError::CreateTarget {
    path: path.to_path_buf(),
    source: e,
  })
}
