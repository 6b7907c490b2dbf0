//! Implementation of the default `cmkproj <DESCRIPTOR>` command.
//!
//! Parses the descriptor, copies every include directory and source file into
//! the target directory, and writes the rewritten descriptor.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;

use cmkproj_lib::materialize::{load_descriptor, materialize};

use super::TargetArgs;
use crate::output::{
  OutputFormat, format_elapsed, format_kbytes, print_done, print_json, print_progress, print_stat,
};

/// Execute the materialize command.
///
/// Prints one progress line per entry (size in kilobytes and source path)
/// followed by a summary. Any failure aborts the run; entries copied before
/// it are left in place.
pub fn cmd_materialize(descriptor: &Path, target: &TargetArgs, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let options = target.resolve()?;

  let build = load_descriptor(descriptor, options.layout)?;
  info!(
    descriptor = %descriptor.display(),
    target = %options.target_root.display(),
    "materializing project"
  );

  let result = materialize(&build, &options, |entry| {
    if !output.is_json() {
      print_progress(&format!(
        "Copying {} with size {} from {}",
        entry.kind,
        format_kbytes(entry.size.bytes),
        entry.entry
      ));
    }
  })?;

  if output.is_json() {
    print_json(&result)?;
    return Ok(());
  }

  let target_root = dunce::canonicalize(&result.target_root).unwrap_or_else(|_| result.target_root.clone());

  println!();
  print_done("Project materialized!");
  print_stat("Target", target_root.display());
  print_stat("Descriptor", result.descriptor_path.display());
  print_stat("Directories copied", result.directories_copied);
  print_stat("Files copied", result.files_copied);
  print_stat("Size", format_kbytes(result.bytes_copied));
  print_stat("Duration", format_elapsed(start.elapsed()));

  Ok(())
}
