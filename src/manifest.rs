//! Structured view over the parsed `assetsManifest` object.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::PruneError;
use crate::exclusions::ExclusionSet;

const ASSETS_FIELD: &str = "assets";
const URL_FIELD: &str = "url";

/// The manifest object embedded in the service worker assets file.
///
/// Fields other than `assets` are carried through untouched, in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetManifest {
  fields: Map<String, Value>,
}

/// Borrowed view of one entry in the `assets` array.
///
/// Only the `url` field is ever inspected; everything else (hashes, integrity strings) is opaque.
#[derive(Debug, Clone, Copy)]
pub struct AssetEntry<'a>(&'a Value);

impl<'a> AssetEntry<'a> {
  /// The entry's `url`, if it is an object with a string `url` field.
  pub fn url(&self) -> Option<&'a str> {
    self.0.get(URL_FIELD).and_then(Value::as_str)
  }

  /// The raw JSON value of the entry.
  pub fn value(&self) -> &'a Value {
    self.0
  }
}

impl AssetManifest {
  /// Validate a parsed literal as a manifest with an `assets` array.
  pub fn from_value(value: Value) -> Result<Self, PruneError> {
    let Value::Object(fields) = value else {
      return Err(PruneError::NotAnObject);
    };
    match fields.get(ASSETS_FIELD) {
      Some(Value::Array(_)) => Ok(Self { fields }),
      Some(_) => Err(PruneError::AssetsNotArray),
      None => Err(PruneError::MissingAssets),
    }
  }

  /// Look up any top-level field.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.fields.get(key)
  }

  /// Entries of the `assets` array, in order.
  pub fn assets(&self) -> impl Iterator<Item = AssetEntry<'_>> {
    self
      .assets_slice()
      .iter()
      .map(AssetEntry)
  }

  /// Number of entries in the `assets` array.
  pub fn asset_count(&self) -> usize {
    self.assets_slice().len()
  }

  /// Drop every entry whose url is excluded, keeping the rest in their original order.
  ///
  /// Returns the urls of the removed entries. Entries without a string `url` are kept.
  pub fn prune(&mut self, exclusions: &ExclusionSet) -> Vec<String> {
    let mut removed = Vec::new();
    if let Some(Value::Array(assets)) = self.fields.get_mut(ASSETS_FIELD) {
      assets.retain(|entry| match AssetEntry(entry).url() {
        Some(url) if exclusions.contains(url) => {
          debug!(url, "removing asset entry");
          removed.push(url.to_string());
          false
        }
        _ => true,
      });
    }
    removed
  }

  /// Serialise back to JSON with two-space indentation.
  pub fn to_pretty_string(&self) -> Result<String, PruneError> {
    Ok(serde_json::to_string_pretty(&self.fields)?)
  }

  fn assets_slice(&self) -> &[Value] {
    match self.fields.get(ASSETS_FIELD) {
      Some(Value::Array(assets)) => assets,
      _ => &[],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn manifest(value: Value) -> AssetManifest {
    AssetManifest::from_value(value).unwrap()
  }

  fn urls(manifest: &AssetManifest) -> Vec<Option<&str>> {
    manifest.assets().map(|entry| entry.url()).collect()
  }

  #[test]
  fn removes_excluded_urls_and_keeps_order() {
    let mut m = manifest(json!({
      "assets": [
        { "url": "manifest.webmanifest" },
        { "url": "b.js" },
        { "url": "app-config.js" },
        { "url": "a.js" },
        { "url": "index.html" }
      ]
    }));

    let removed = m.prune(&ExclusionSet::default());

    assert_eq!(removed, vec!["manifest.webmanifest", "app-config.js"]);
    assert_eq!(
      urls(&m),
      vec![Some("b.js"), Some("a.js"), Some("index.html")]
    );
  }

  #[test]
  fn removes_every_duplicate_of_an_excluded_url() {
    let mut m = manifest(json!({
      "assets": [{ "url": "app-config.js", "hash": "1" }, { "url": "app-config.js", "hash": "2" }]
    }));
    assert_eq!(m.prune(&ExclusionSet::default()).len(), 2);
    assert_eq!(m.asset_count(), 0);
  }

  #[test]
  fn entries_without_string_url_are_kept() {
    let mut m = manifest(json!({
      "assets": [{ "hash": "x" }, { "url": 7 }, "app-config.js", null]
    }));
    assert!(m.prune(&ExclusionSet::default()).is_empty());
    assert_eq!(m.asset_count(), 4);
  }

  #[test]
  fn other_fields_and_entry_contents_pass_through() {
    let original = json!({
      "version": "abc123",
      "assets": [
        { "hash": "sha256-1", "url": "main.js", "extra": [1, 2] },
        { "url": "app-config.js", "hash": "sha256-2" }
      ],
      "offline": true
    });
    let mut m = manifest(original);
    m.prune(&ExclusionSet::default());

    assert_eq!(m.get("version"), Some(&json!("abc123")));
    assert_eq!(m.get("offline"), Some(&json!(true)));
    let kept = m.assets().next().unwrap();
    assert_eq!(
      kept.value(),
      &json!({ "hash": "sha256-1", "url": "main.js", "extra": [1, 2] })
    );
  }

  #[test]
  fn injected_exclusions_are_honoured() {
    let mut m = manifest(json!({ "assets": [{ "url": "app-config.js" }, { "url": "sw.js" }] }));
    let only_sw: ExclusionSet = ["sw.js"].into_iter().collect();
    assert_eq!(m.prune(&only_sw), vec!["sw.js"]);
    assert_eq!(urls(&m), vec![Some("app-config.js")]);
  }

  #[test]
  fn pretty_output_keeps_key_order_with_two_space_indent() {
    let value: Value =
      serde_json::from_str(r#"{"version":1,"assets":[{"url":"main.js","hash":"def"}]}"#).unwrap();
    let rendered = manifest(value).to_pretty_string().unwrap();
    assert_eq!(
      rendered,
      "{\n  \"version\": 1,\n  \"assets\": [\n    {\n      \"url\": \"main.js\",\n      \"hash\": \"def\"\n    }\n  ]\n}"
    );
  }

  #[test]
  fn rejects_non_object_literal() {
    let err = AssetManifest::from_value(json!([1, 2])).unwrap_err();
    assert!(matches!(err, PruneError::NotAnObject));
  }

  #[test]
  fn rejects_missing_or_malformed_assets() {
    assert!(matches!(
      AssetManifest::from_value(json!({ "version": 1 })),
      Err(PruneError::MissingAssets)
    ));
    assert!(matches!(
      AssetManifest::from_value(json!({ "assets": {} })),
      Err(PruneError::AssetsNotArray)
    ));
  }
}
