use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::consts::{DEFAULT_PROJECT_NAME, DEFAULT_SIZE_THRESHOLD};
use crate::descriptor::Layout;
use crate::descriptor::emit::EmitInput;
use crate::size::SizeReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
  IncludeDirectory,
  SourceFile,
}

impl EntryKind {
  /// What the entry has to be on disk.
  pub fn expected(self) -> &'static str {
    match self {
      EntryKind::IncludeDirectory => "directory",
      EntryKind::SourceFile => "regular file",
    }
  }
}

impl fmt::Display for EntryKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EntryKind::IncludeDirectory => f.write_str("include directory"),
      EntryKind::SourceFile => f.write_str("source file"),
    }
  }
}

#[derive(Debug, Clone)]
pub struct MaterializeOptions {
  /// Root of the generated project. Created if missing.
  pub target_root: PathBuf,
  /// Directory that relative entries are resolved against.
  pub base_dir: PathBuf,
  pub project_name: String,
  pub layout: Layout,
  /// Entries larger than this many bytes are reported, never refused.
  pub size_threshold: u64,
}

impl MaterializeOptions {
  pub fn new(target_root: PathBuf, base_dir: PathBuf) -> Self {
    Self {
      target_root,
      base_dir,
      project_name: DEFAULT_PROJECT_NAME.to_string(),
      layout: Layout::default(),
      size_threshold: DEFAULT_SIZE_THRESHOLD,
    }
  }
}

/// A single entry scheduled for copying.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedCopy {
  pub kind: EntryKind,
  /// The entry as written in the descriptor.
  pub entry: String,
  pub source: PathBuf,
  pub destination: PathBuf,
  /// Path written to the emitted descriptor, relative to the target root.
  pub emitted_path: String,
  pub size: SizeReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plan {
  pub target_root: PathBuf,
  pub descriptor_path: PathBuf,
  pub minimum_version: String,
  pub project_name: String,
  pub layout: Layout,
  pub size_threshold: u64,
  pub entries: Vec<PlannedCopy>,
}

impl Plan {
  pub fn total_bytes(&self) -> u64 {
    self.entries.iter().map(|e| e.size.bytes).sum()
  }

  pub fn oversized(&self) -> impl Iterator<Item = &PlannedCopy> {
    self.entries.iter().filter(|e| e.size.exceeds_threshold)
  }

  pub fn count(&self, kind: EntryKind) -> usize {
    self.entries.iter().filter(|e| e.kind == kind).count()
  }

  pub(crate) fn emit_input(&self) -> EmitInput<'_> {
    let paths_of = |kind: EntryKind| -> Vec<String> {
      self
        .entries
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| e.emitted_path.clone())
        .collect()
    };

    EmitInput {
      minimum_version: &self.minimum_version,
      project_name: &self.project_name,
      layout: self.layout,
      include_directories: paths_of(EntryKind::IncludeDirectory),
      sources: paths_of(EntryKind::SourceFile),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterializeResult {
  pub target_root: PathBuf,
  pub descriptor_path: PathBuf,
  pub directories_copied: usize,
  pub files_copied: usize,
  pub bytes_copied: u64,
}
