mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{TargetArgs, cmd_inspect, cmd_materialize, cmd_plan};
use output::OutputFormat;

/// cmkproj - Materialize a standalone CMake project from a build descriptor
///
/// Copies the include directories and source files listed in DESCRIPTOR into
/// ./cmake_project/ and writes a rewritten CMakeLists.txt next to them.
#[derive(Parser)]
#[command(name = "cmkproj")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,

  /// Path to the build descriptor (e.g. CMakeLists.txt)
  descriptor: Option<PathBuf>,

  #[command(flatten)]
  target: TargetArgs,

  /// Output format for the summary
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
  /// Show what would be copied and where, without touching the target
  Plan {
    /// Path to the build descriptor
    descriptor: PathBuf,

    #[command(flatten)]
    target: TargetArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// Print the directives parsed from a build descriptor
  Inspect {
    /// Path to the build descriptor
    descriptor: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  init_tracing(cli.verbose);

  match cli.command {
    Some(Commands::Plan {
      descriptor,
      target,
      output,
    }) => cmd_plan(&descriptor, &target, output),
    Some(Commands::Inspect { descriptor, output }) => cmd_inspect(&descriptor, output),
    None => match cli.descriptor {
      Some(descriptor) => cmd_materialize(&descriptor, &cli.target, cli.output),
      None => Cli::command()
        .error(ErrorKind::MissingRequiredArgument, "a path to a build descriptor is required")
        .exit(),
    },
  }
}

/// Log to stderr so JSON output on stdout stays parseable. `RUST_LOG` wins
/// over `--verbose`.
fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
