mod inspect;
mod materialize;
mod plan;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cmkproj_lib::config::Settings;
use cmkproj_lib::descriptor::Layout;
use cmkproj_lib::materialize::MaterializeOptions;

pub use inspect::cmd_inspect;
pub use materialize::cmd_materialize;
pub use plan::cmd_plan;

/// Options shaping the generated project.
///
/// Unset flags fall back to `CMKPROJ_*` environment variables, then to the
/// built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
  /// Directory to create the project in (default: ./cmake_project)
  #[arg(short = 't', long, value_name = "DIR")]
  pub target_dir: Option<PathBuf>,

  /// Project name written to the generated descriptor
  #[arg(long, value_name = "NAME")]
  pub project_name: Option<String>,

  /// Copy include directories only and emit an include_directories block
  #[arg(long)]
  pub includes_only: bool,

  /// Warn about entries larger than this many bytes (default: 20000000)
  #[arg(long, value_name = "BYTES")]
  pub threshold: Option<u64>,
}

impl TargetArgs {
  pub fn layout(&self) -> Layout {
    if self.includes_only {
      Layout::IncludesOnly
    } else {
      Layout::Executable
    }
  }

  /// Merge flags over environment settings for the current directory.
  pub fn resolve(&self) -> Result<MaterializeOptions> {
    let settings = Settings::current().context("Failed to load settings")?;

    let target_root = match &self.target_dir {
      Some(dir) => settings.base_dir.join(dir),
      None => settings.target_root,
    };

    let mut options = MaterializeOptions::new(target_root, settings.base_dir);
    options.project_name = self.project_name.clone().unwrap_or(settings.project_name);
    options.layout = self.layout();
    options.size_threshold = self.threshold.unwrap_or(settings.size_threshold);
    Ok(options)
  }
}
