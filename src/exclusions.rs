//! The fixed set of asset urls whose manifest entries go stale after the build.

use std::collections::BTreeSet;

/// Files rewritten after the service worker manifest was generated.
///
/// Both are regenerated per deployment, so the integrity hashes recorded for them no longer
/// match and the service worker would refuse to install if they stayed in the manifest.
pub const DEFAULT_EXCLUSIONS: &[&str] = &["app-config.js", "manifest.webmanifest"];

/// Set of asset urls to strip from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
  urls: BTreeSet<String>,
}

impl ExclusionSet {
  /// Whether an entry with this url should be removed.
  pub fn contains(&self, url: &str) -> bool {
    self.urls.contains(url)
  }

  /// Iterate the excluded urls in sorted order.
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.urls.iter().map(String::as_str)
  }

  /// Number of excluded urls.
  pub fn len(&self) -> usize {
    self.urls.len()
  }

  /// Whether the set excludes nothing.
  pub fn is_empty(&self) -> bool {
    self.urls.is_empty()
  }
}

impl Default for ExclusionSet {
  fn default() -> Self {
    DEFAULT_EXCLUSIONS.iter().copied().collect()
  }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self {
      urls: iter.into_iter().map(Into::into).collect(),
    }
  }
}
