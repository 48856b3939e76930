mod args;
mod shim_dir_builder;
mod types;

use std::{path::Path, process::ExitCode, time::Instant};

use ansi_term::Colour;
use anyhow::Context;
use args::{AnalyzeArgs, CollectArgs, Command, ContainerArgs, EntryArgs, ShimArgs};
use clap::Parser;
use fedpack::{
  normalize_options, BuildError, BuildResult, ContainerContext, Dependency, EntryRewriter,
  ExportAnalyzer, FederationOptions, InputItem, OxcExportAnalyzer, RemoteContainer,
  ShimSynthesizer,
};
use shim_dir_builder::ShimDirBuilder;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[command(subcommand)]
  command: Command,
}

fn read_file(file: &Path) -> BuildResult<String> {
  let content = std::fs::read_to_string(file)
    .with_context(|| format!("failed to read {}", file.display()))?;
  Ok(content)
}

fn shim(args: ShimArgs) -> BuildResult<()> {
  let dependency = Dependency::new(args.request)?;
  let content = read_file(&args.file)?;
  let shim = ShimSynthesizer::synthesize_with(&dependency, &args.file, &content, &OxcExportAnalyzer)?;
  println!("{shim}");
  Ok(())
}

fn analyze(args: AnalyzeArgs) -> BuildResult<()> {
  let content = read_file(&args.file)?;
  let classification = OxcExportAnalyzer.classify(&content, &args.file)?;

  let dim = Colour::White.dimmed();
  println!("{} {:?}", dim.paint("kind:"), classification.exports_kind);
  if classification.has_star_reexport {
    println!("{} yes", dim.paint("star re-export:"));
  }
  for name in &classification.export_names {
    println!("{} {}", dim.paint("export"), Colour::Cyan.paint(name.as_str()));
  }
  Ok(())
}

fn entry(args: EntryArgs) -> BuildResult<()> {
  let input =
    args.input.iter().map(|p| InputItem::from(p.to_string_lossy())).collect::<Vec<_>>();

  for entry in EntryRewriter::rewrite(&input)? {
    println!("{} {}", Colour::Cyan.paint(entry.name), Colour::White.dimmed().paint(entry.import));
    println!("  {}", entry.content);
  }
  Ok(())
}

async fn collect(args: CollectArgs) -> BuildResult<()> {
  let ContainerArgs { cwd, platform, name, filename, dir } = args.container;
  let options = normalize_options(FederationOptions {
    input: None,
    cwd,
    platform: platform.map(Into::into),
    name,
    filename,
    dir,
  });

  let builder = ShimDirBuilder::new(options.cwd.join(&options.dir));
  let dir = options.dir.clone();
  let container = RemoteContainer::with_context(ContainerContext::new(options), builder);

  let mut errors = vec![];
  for request in &args.requests {
    if let Err(err) = container.collect(request).await {
      errors.extend(err.0);
    }
  }
  if !errors.is_empty() {
    return Err(BuildError::from(errors));
  }

  let manifest = container.manifest().await;
  let dim = Colour::White.dimmed();
  let width = manifest.exposes.values().map(|module| module.expose_key().len()).max().unwrap_or(0);
  for module in manifest.exposes.values() {
    println!(
      "{}{:width$} {}{}",
      Colour::Cyan.paint(module.expose_key()),
      "",
      dim.paint("→ "),
      dim.paint(module.file_path.display().to_string()),
      width = width - module.expose_key().len()
    );
  }

  if let Some(artifact) = container.build().await? {
    println!(
      "{}{} {}{}",
      dim.paint(format!("{dir}/")),
      Colour::Cyan.paint(artifact.filename),
      dim.paint("container │ hash: "),
      artifact.hash
    );
  }
  Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Commands::parse();

  let start = Instant::now();
  let result = match args.command {
    Command::Shim(args) => shim(args),
    Command::Analyze(args) => analyze(args),
    Command::Entry(args) => entry(args),
    Command::Collect(args) => collect(args).await,
  };

  match result {
    Ok(()) => {
      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      eprintln!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
      ExitCode::SUCCESS
    }
    Err(errors) => {
      for error in &*errors {
        eprintln!("{} {:#}", Colour::Red.paint("Error:"), error);
      }
      ExitCode::FAILURE
    }
  }
}

#[test]
fn read_file_names_the_missing_file() {
  let dir = tempfile::tempdir().unwrap();
  let file = dir.path().join("missing.js");

  let err = read_file(&file).unwrap_err();
  let message = err.to_string();
  assert!(message.starts_with(&format!("failed to read {}", file.display())), "{message}");
}
