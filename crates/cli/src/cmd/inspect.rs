//! Implementation of the `cmkproj inspect` command.

use std::path::Path;

use anyhow::{Context, Result};

use cmkproj_lib::descriptor::{Directive, Layout, parse_file};

use crate::output::{OutputFormat, print_json, print_warning, symbols};

/// Print what the parser found in `descriptor`, without validating it.
///
/// Directives the default layout needs but the file lacks are reported as
/// warnings; the command still succeeds.
pub fn cmd_inspect(descriptor: &Path, output: OutputFormat) -> Result<()> {
  let raw = parse_file(descriptor).with_context(|| format!("Failed to parse descriptor: {}", descriptor.display()))?;

  if output.is_json() {
    return print_json(&raw);
  }

  println!("Descriptor: {}", descriptor.display());
  match &raw.minimum_version {
    Some(version) => println!("  {}: {}", Directive::MinimumVersion, version),
    None => println!("  {}: {}", Directive::MinimumVersion, symbols::ABSENT),
  }
  print_list(Directive::IncludeDirectories, raw.include_directories.as_deref());
  print_list(Directive::Sources, raw.sources.as_deref());

  for &directive in Layout::Executable.required_directives() {
    if !raw.has(directive) {
      print_warning(&format!("no '{}' directive found", directive));
    }
  }

  Ok(())
}

fn print_list(directive: Directive, entries: Option<&[String]>) {
  match entries {
    Some(entries) => {
      println!("  {} ({}):", directive, entries.len());
      for entry in entries {
        println!("    {}", entry);
      }
    }
    None => println!("  {}: {}", directive, symbols::ABSENT),
  }
}
