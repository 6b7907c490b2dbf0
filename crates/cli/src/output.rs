//! Terminal output for cmkproj.
//!
//! Progress and summaries go to stdout, warnings to stderr. Sizes are shown in
//! kilobytes of 1000 bytes everywhere, matching the per-entry progress lines.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use cmkproj_lib::size::kilobytes;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const DONE: &str = "✓";
  pub const WARNING: &str = "⚠";
  pub const COPYING: &str = "•";
  pub const MAPS_TO: &str = "→";
  pub const PLANNED: &str = "+";
  pub const ABSENT: &str = "-";
}

/// `bytes` as whole kilobytes, e.g. `1500` becomes `1 kbytes`.
pub fn format_kbytes(bytes: u64) -> String {
  format!("{} kbytes", kilobytes(bytes))
}

/// Elapsed time with millisecond precision below one second.
pub fn format_elapsed(elapsed: Duration) -> String {
  if elapsed < Duration::from_secs(1) {
    format!("{}ms", elapsed.as_millis())
  } else {
    format!("{:.2}s", elapsed.as_secs_f64())
  }
}

pub fn print_done(message: &str) {
  println!(
    "{} {}",
    symbols::DONE.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_progress(message: &str) {
  println!(
    "{} {}",
    symbols::COPYING.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

/// One `label: value` line of a summary block.
pub fn print_stat(label: &str, value: impl std::fmt::Display) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("failed to encode output as JSON")?;
  println!("{json}");
  Ok(())
}
