//! Command line entry point: `sw-asset-pruner <path-to-service-worker-assets.js>`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use sw_asset_pruner::{ExclusionSet, ManifestAssetPruner, PruneError, PruneReport};

const USAGE: &str = "Usage: sw-asset-pruner <path-to-service-worker-assets.js>";

#[derive(Parser)]
#[command(
  name = "sw-asset-pruner",
  about = "Remove post-build rewritten files from a service worker assets manifest",
  version
)]
struct Cli {
  /// Generated service-worker-assets.js file to rewrite in place
  path: Option<PathBuf>,

  /// Report what would be removed without writing the file
  #[arg(long)]
  dry_run: bool,

  /// Enable debug logging on stderr
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        err.exit();
      }
      print!("{err}");
      return ExitCode::FAILURE;
    }
  };

  init_logging(cli.verbose);

  let Some(path) = cli.path.as_deref() else {
    println!("{USAGE}");
    return ExitCode::FAILURE;
  };

  match run(path, cli.dry_run) {
    Ok(report) => {
      let verb = if cli.dry_run { "Would remove" } else { "Removed" };
      println!(
        "{verb} {} asset(s) from service worker manifest",
        report.removed_count()
      );
      ExitCode::SUCCESS
    }
    Err(err) => {
      match err.downcast_ref::<PruneError>() {
        Some(PruneError::NotFound { .. }) => println!("{err}"),
        _ => println!("Error: {err:#}"),
      }
      ExitCode::FAILURE
    }
  }
}

fn run(path: &Path, dry_run: bool) -> Result<PruneReport> {
  let pruner = ManifestAssetPruner::new(ExclusionSet::default()).dry_run(dry_run);
  tracing::debug!(
    exclusions = ?pruner.exclusions().iter().collect::<Vec<_>>(),
    "pruning service worker manifest"
  );
  Ok(pruner.prune_file(path)?)
}

fn init_logging(verbose: bool) {
  let default_filter = if verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
    )
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}
