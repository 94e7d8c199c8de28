//! Error type shared by the document, manifest and pruner modules.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that can occur while pruning a service worker assets manifest.
#[derive(Debug, Error)]
pub enum PruneError {
  /// The `self.assetsManifest = {...};` statement was not present.
  #[error("Could not find assetsManifest in {}", path.display())]
  NotFound {
    /// File that was searched.
    path: PathBuf,
  },
  /// The statement appears more than once, so the target is ambiguous.
  #[error("found more than one assetsManifest assignment in {}", path.display())]
  DuplicateAssignment {
    /// File that was searched.
    path: PathBuf,
  },
  /// Reading the manifest file failed.
  #[error("failed to read {}", path.display())]
  Read {
    /// File that could not be read.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: io::Error,
  },
  /// Writing the rewritten manifest failed.
  #[error("failed to write {}", path.display())]
  Write {
    /// File that could not be written.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: io::Error,
  },
  /// The embedded literal is not valid JSON.
  #[error("invalid assetsManifest literal")]
  Json(#[from] serde_json::Error),
  /// The literal parsed, but is not a JSON object.
  #[error("assetsManifest literal is not an object")]
  NotAnObject,
  /// The manifest object has no `assets` field.
  #[error("assetsManifest has no `assets` field")]
  MissingAssets,
  /// The `assets` field is present but not an array.
  #[error("assetsManifest `assets` field is not an array")]
  AssetsNotArray,
}
