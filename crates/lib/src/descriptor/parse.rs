//! Line-oriented descriptor scanner.
//!
//! Directive openers are recognised by substring containment, so a comment
//! mentioning `include_directories` opens a block too. A second block of the
//! same directive replaces the first.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::types::{Directive, RawDescriptor};
use crate::paths::sanitize_entry;

/// Marks the end of a block. The closing line itself is never stored.
const CLOSE_MARKER: char = ')';

#[derive(Debug, Error)]
pub enum ParseError {
  #[error("failed to read descriptor {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("'{directive}' block opened on line {line} is never closed")]
  UnclosedBlock { directive: Directive, line: usize },

  #[error("'cmake_minimum_required' on line {line} has no parenthesised version")]
  MalformedVersion { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  Scanning,
  InIncludeBlock { opened_at: usize },
  InSourceBlock { opened_at: usize },
}

/// Parse descriptor text.
pub fn parse_descriptor(text: &str) -> Result<RawDescriptor, ParseError> {
  let mut raw = RawDescriptor::default();
  let mut state = State::Scanning;

  for (idx, line) in text.lines().enumerate() {
    let line_no = idx + 1;

    state = match state {
      State::Scanning => {
        if line.contains(Directive::MinimumVersion.keyword()) {
          raw.minimum_version = Some(version_token(line).ok_or(ParseError::MalformedVersion { line: line_no })?);
        }

        if line.contains(Directive::IncludeDirectories.keyword()) {
          raw.include_directories = Some(Vec::new());
          State::InIncludeBlock { opened_at: line_no }
        } else if line.contains(Directive::Sources.keyword()) {
          raw.sources = Some(Vec::new());
          State::InSourceBlock { opened_at: line_no }
        } else {
          State::Scanning
        }
      }
      State::InIncludeBlock { .. } | State::InSourceBlock { .. } if line.contains(CLOSE_MARKER) => State::Scanning,
      State::InIncludeBlock { .. } => {
        raw.include_directories.get_or_insert_default().push(sanitize_entry(line));
        state
      }
      State::InSourceBlock { .. } => {
        raw.sources.get_or_insert_default().push(sanitize_entry(line));
        state
      }
    };
  }

  match state {
    State::Scanning => {}
    State::InIncludeBlock { opened_at } => {
      return Err(ParseError::UnclosedBlock {
        directive: Directive::IncludeDirectories,
        line: opened_at,
      });
    }
    State::InSourceBlock { opened_at } => {
      return Err(ParseError::UnclosedBlock {
        directive: Directive::Sources,
        line: opened_at,
      });
    }
  }

  debug!(
    version = ?raw.minimum_version,
    includes = raw.include_directories.as_ref().map(Vec::len),
    sources = raw.sources.as_ref().map(Vec::len),
    "parsed descriptor"
  );

  Ok(raw)
}

/// Read and parse a descriptor file.
pub fn parse_file(path: &Path) -> Result<RawDescriptor, ParseError> {
  let text = fs::read_to_string(path).map_err(|e| ParseError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;
  parse_descriptor(&text)
}

/// Text between the first `(` and the next parenthesis (or end of line).
fn version_token(line: &str) -> Option<String> {
  let (_, after) = line.split_once('(')?;
  let end = after.find(['(', ')']).unwrap_or(after.len());
  Some(after[..end].to_string())
}
