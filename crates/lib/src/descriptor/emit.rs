//! Rendering of the rewritten build descriptor.
//!
//! Source and include entries are rendered as blocks the parser recognises,
//! so an emitted descriptor parses back to the same number of entries.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::types::{Directive, Layout};
use crate::consts::{DESCRIPTOR_FILENAME, EXECUTABLE_TARGET};

const DIRECTIVES: [Directive; 3] = [
  Directive::MinimumVersion,
  Directive::IncludeDirectories,
  Directive::Sources,
];

#[derive(Debug, Error)]
pub enum EmitError {
  #[error("invalid project name '{name}': use letters, digits, '_', '-', '.' or '+' and no directive keywords")]
  InvalidProjectName { name: String },

  #[error("failed to write descriptor {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Everything the emitter needs, with paths already relative to the target
/// root.
#[derive(Debug, Clone)]
pub struct EmitInput<'a> {
  pub minimum_version: &'a str,
  pub project_name: &'a str,
  pub layout: Layout,
  pub include_directories: Vec<String>,
  pub sources: Vec<String>,
}

pub fn validate_project_name(name: &str) -> Result<(), EmitError> {
  let valid = !name.is_empty()
    && name
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
    && !DIRECTIVES.iter().any(|d| name.contains(d.keyword()));
  if valid {
    Ok(())
  } else {
    Err(EmitError::InvalidProjectName { name: name.to_string() })
  }
}

/// Render the descriptor text.
pub fn render(input: &EmitInput<'_>) -> Result<String, EmitError> {
  validate_project_name(input.project_name)?;

  let mut out = format!(
    "cmake_minimum_required({})\nproject({})\n\n",
    input.minimum_version, input.project_name
  );

  match input.layout {
    Layout::Executable => {
      write_block(&mut out, "set(SOURCES", &input.sources);
      out.push_str(&format!("add_executable({} ${{SOURCES}})\n\n", EXECUTABLE_TARGET));
      write_block(
        &mut out,
        &format!("target_include_directories({} PUBLIC", EXECUTABLE_TARGET),
        &input.include_directories,
      );
    }
    Layout::IncludesOnly => {
      write_block(&mut out, "include_directories(", &input.include_directories);
    }
  }

  Ok(out)
}

/// Render and write `CMakeLists.txt` into `target_root`, replacing any
/// existing file. Returns the written path.
pub fn write_descriptor(target_root: &Path, input: &EmitInput<'_>) -> Result<PathBuf, EmitError> {
  let content = render(input)?;
  let path = target_root.join(DESCRIPTOR_FILENAME);

  fs::write(&path, content).map_err(|e| EmitError::Write {
    path: path.clone(),
    source: e,
  })?;

  debug!(path = %path.display(), "wrote descriptor");
  Ok(path)
}

fn write_block(out: &mut String, opener: &str, entries: &[String]) {
  out.push_str(opener);
  out.push('\n');
  for entry in entries {
    out.push_str(&format!("  {}\n", entry));
  }
  out.push_str(")\n");
}
