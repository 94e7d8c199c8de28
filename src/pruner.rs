//! Removing stale entries from a service worker assets manifest file.

use std::path::Path;

use tracing::{debug, info};

use crate::document::ManifestDocument;
use crate::error::PruneError;
use crate::exclusions::ExclusionSet;
use crate::manifest::AssetManifest;

/// Outcome of pruning one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneReport {
  /// Length of `assets` before filtering.
  pub original_count: usize,
  /// Length of `assets` after filtering.
  pub retained_count: usize,
  /// Urls of the removed entries, in the order they appeared.
  pub removed_urls: Vec<String>,
  /// Whether the file on disk was rewritten.
  pub written: bool,
}

impl PruneReport {
  /// Number of entries dropped from `assets`.
  pub fn removed_count(&self) -> usize {
    self.original_count - self.retained_count
  }
}

/// Strips entries whose url is in an [`ExclusionSet`] from a generated assets manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestAssetPruner {
  exclusions: ExclusionSet,
  dry_run: bool,
}

impl ManifestAssetPruner {
  /// Create a pruner for the given exclusions.
  pub fn new(exclusions: ExclusionSet) -> Self {
    Self {
      exclusions,
      dry_run: false,
    }
  }

  /// When enabled, [`Self::prune_file`] computes the result but leaves the file untouched.
  pub fn dry_run(mut self, dry_run: bool) -> Self {
    self.dry_run = dry_run;
    self
  }

  /// Exclusions this pruner applies.
  pub fn exclusions(&self) -> &ExclusionSet {
    &self.exclusions
  }

  /// Produce the rewritten document text without touching the filesystem.
  pub fn prune_document(
    &self,
    document: &ManifestDocument,
  ) -> Result<(String, PruneReport), PruneError> {
    let assignment = document.locate()?;
    let mut manifest = AssetManifest::from_value(assignment.value)?;

    let original_count = manifest.asset_count();
    let removed_urls = manifest.prune(&self.exclusions);
    let retained_count = manifest.asset_count();

    let literal = manifest.to_pretty_string()?;
    let rewritten = document.rewrite(&assignment.statement, &literal);

    debug!(
      path = %document.path().display(),
      original_count,
      retained_count,
      "pruned assetsManifest"
    );

    Ok((
      rewritten,
      PruneReport {
        original_count,
        retained_count,
        removed_urls,
        written: false,
      },
    ))
  }

  /// Read `path`, prune its manifest and overwrite it with the result.
  ///
  /// Nothing is written unless locating, parsing and serialising all succeed.
  pub fn prune_file(&self, path: &Path) -> Result<PruneReport, PruneError> {
    let document = ManifestDocument::read(path)?;
    let (rewritten, mut report) = self.prune_document(&document)?;

    if self.dry_run {
      info!(path = %path.display(), "dry run, leaving manifest untouched");
    } else {
      document.overwrite(&rewritten)?;
      report.written = true;
    }

    Ok(report)
  }
}
