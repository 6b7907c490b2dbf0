use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The three directives recognised in a build descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
  MinimumVersion,
  IncludeDirectories,
  Sources,
}

impl Directive {
  /// Substring that marks a line as this directive's opener.
  pub fn keyword(self) -> &'static str {
    match self {
      Directive::MinimumVersion => "cmake_minimum_required",
      Directive::IncludeDirectories => "include_directories",
      Directive::Sources => "set(SOURCES",
    }
  }
}

impl fmt::Display for Directive {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.keyword())
  }
}

/// Which descriptor shape gets emitted, and therefore which directives the
/// input must provide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
  /// Executable target built from the copied sources, with the copied
  /// include directories as public include paths.
  #[default]
  Executable,
  /// Include directories only; sources are neither required nor copied.
  IncludesOnly,
}

impl Layout {
  pub fn required_directives(self) -> &'static [Directive] {
    match self {
      Layout::Executable => &[
        Directive::MinimumVersion,
        Directive::IncludeDirectories,
        Directive::Sources,
      ],
      Layout::IncludesOnly => &[Directive::IncludeDirectories],
    }
  }
}

/// Direct result of scanning a descriptor. `None` means the directive never
/// appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawDescriptor {
  pub minimum_version: Option<String>,
  pub include_directories: Option<Vec<String>>,
  pub sources: Option<Vec<String>>,
}

impl RawDescriptor {
  pub fn has(&self, directive: Directive) -> bool {
    match directive {
      Directive::MinimumVersion => self.minimum_version.is_some(),
      Directive::IncludeDirectories => self.include_directories.is_some(),
      Directive::Sources => self.sources.is_some(),
    }
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
  #[error("descriptor has no '{directive}' directive")]
  MissingDirective { directive: Directive },

  #[error("entry {index} of '{directive}' is empty")]
  EmptyEntry { directive: Directive, index: usize },
}

/// A validated build descriptor.
///
/// Only obtainable through [`BuildDescriptor::validate`], so every directive
/// the chosen layout needs is known to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDescriptor {
  minimum_version: String,
  include_directories: Vec<String>,
  sources: Vec<String>,
}

impl BuildDescriptor {
  /// Check `raw` against the directives `layout` needs.
  ///
  /// For [`Layout::IncludesOnly`] a missing version falls back to
  /// `VERSION 3.0` and any source block is dropped.
  pub fn validate(raw: RawDescriptor, layout: Layout) -> Result<Self, DescriptorError> {
    for &directive in layout.required_directives() {
      if !raw.has(directive) {
        return Err(DescriptorError::MissingDirective { directive });
      }
    }

    let include_directories = raw.include_directories.unwrap_or_default();
    let sources = match layout {
      Layout::Executable => raw.sources.unwrap_or_default(),
      Layout::IncludesOnly => Vec::new(),
    };

    check_entries(Directive::IncludeDirectories, &include_directories)?;
    check_entries(Directive::Sources, &sources)?;

    Ok(Self {
      minimum_version: raw
        .minimum_version
        .unwrap_or_else(|| crate::consts::DEFAULT_MINIMUM_VERSION.to_string()),
      include_directories,
      sources,
    })
  }

  pub fn minimum_version(&self) -> &str {
    &self.minimum_version
  }

  pub fn include_directories(&self) -> &[String] {
    &self.include_directories
  }

  pub fn sources(&self) -> &[String] {
    &self.sources
  }
}

fn check_entries(directive: Directive, entries: &[String]) -> Result<(), DescriptorError> {
  match entries.iter().position(|e| e.trim().is_empty()) {
    Some(index) => Err(DescriptorError::EmptyEntry { directive, index }),
    None => Ok(()),
  }
}
