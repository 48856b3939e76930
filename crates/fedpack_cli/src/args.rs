use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::platform::Platform;

#[derive(Subcommand)]
pub enum Command {
  /// Print the shim a dependency is exposed through.
  Shim(ShimArgs),

  /// Print the module system and export names of a script.
  Analyze(AnalyzeArgs),

  /// Print the asynchronous stubs that replace the application entries.
  Entry(EntryArgs),

  /// Resolve dependencies and write their shims into the container directory.
  Collect(CollectArgs),
}

#[derive(Args)]
pub struct ShimArgs {
  /// The specifier the shim re-exports from.
  pub request: String,

  /// The file the request resolves to.
  pub file: PathBuf,
}

#[derive(Args)]
pub struct AnalyzeArgs {
  pub file: PathBuf,
}

#[derive(Args)]
pub struct EntryArgs {
  #[clap(long, short, action = clap::ArgAction::Append, required = true)]
  pub input: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CollectArgs {
  /// Dependency requests, e.g. `lodash` or `normalize.css`.
  #[clap(required = true)]
  pub requests: Vec<String>,

  #[clap(flatten)]
  pub container: ContainerArgs,
}

#[derive(Args)]
pub struct ContainerArgs {
  #[clap(long)]
  pub cwd: Option<PathBuf>,

  #[clap(long, short)]
  pub platform: Option<Platform>,

  /// Name of the remote container.
  #[clap(long, short)]
  pub name: Option<String>,

  #[clap(long, short)]
  pub filename: Option<String>,

  #[clap(long, short = 'd')]
  pub dir: Option<String>,
}
