//! Implementation of the `cmkproj plan` command.
//!
//! Resolves and measures every entry and shows where it would be copied.
//! The target directory is not touched.

use std::path::Path;

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};

use cmkproj_lib::materialize::{EntryKind, load_descriptor, plan};

use super::TargetArgs;
use crate::output::{OutputFormat, format_kbytes, print_json, print_stat, print_warning, symbols};

pub fn cmd_plan(descriptor: &Path, target: &TargetArgs, output: OutputFormat) -> Result<()> {
  let options = target.resolve()?;
  let build = load_descriptor(descriptor, options.layout)?;
  let plan = plan(&build, &options)?;

  if output.is_json() {
    return print_json(&plan);
  }

  println!("Plan: {}", plan.target_root.display());
  for entry in &plan.entries {
    println!(
      "  {} {} {} {} {}",
      symbols::PLANNED.if_supports_color(Stream::Stdout, |s| s.green()),
      entry.entry,
      symbols::MAPS_TO,
      entry.emitted_path,
      format!("({})", format_kbytes(entry.size.bytes)).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }

  for entry in plan.oversized() {
    print_warning(&format!(
      "{} exceeds {} bytes and will still be copied",
      entry.entry, plan.size_threshold
    ));
  }

  println!();
  print_stat("Include directories", plan.count(EntryKind::IncludeDirectory));
  print_stat("Source files", plan.count(EntryKind::SourceFile));
  print_stat("Total size", format_kbytes(plan.total_bytes()));
  print_stat("Descriptor", plan.descriptor_path.display());
  println!();
  println!("Dry run - no changes made");

  Ok(())
}
