//! Reading the generated service worker assets file and locating the manifest assignment.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::PruneError;

/// Global binding the build pipeline assigns the manifest object to.
pub const MANIFEST_BINDING: &str = "self.assetsManifest";

fn assignment_anchor() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"\bself\.assetsManifest\s*=\s*\{").expect("invalid assetsManifest regex")
  })
}

/// The located `self.assetsManifest = {...};` statement.
#[derive(Debug)]
pub struct Assignment {
  /// Byte range of the whole statement, from the binding name through the `;`.
  pub statement: Range<usize>,
  /// Parsed object literal.
  pub value: Value,
}

/// Full text of a service worker assets file.
#[derive(Debug, Clone)]
pub struct ManifestDocument {
  path: PathBuf,
  text: String,
}

impl ManifestDocument {
  /// Wrap already-loaded text. `path` is only used for messages and [`Self::overwrite`].
  pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      text: text.into(),
    }
  }

  /// Read the document from disk.
  pub fn read(path: &Path) -> Result<Self, PruneError> {
    let text = fs::read_to_string(path).map_err(|source| PruneError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Ok(Self::new(path, text))
  }

  /// Path the document was read from.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Raw file content.
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Find and parse the manifest assignment.
  ///
  /// The binding name anchors the match; the object literal itself is consumed by a streaming
  /// JSON reader, so nested braces inside the literal and any `};` in the surrounding script do
  /// not affect where the statement ends. The literal must be followed by `;`.
  pub fn locate(&self) -> Result<Assignment, PruneError> {
    let anchor = assignment_anchor()
      .find(&self.text)
      .ok_or_else(|| self.not_found())?;
    let literal_start = anchor.end() - 1;

    let mut stream =
      serde_json::Deserializer::from_str(&self.text[literal_start..]).into_iter::<Value>();
    let value = match stream.next() {
      Some(parsed) => parsed?,
      None => return Err(self.not_found()),
    };
    let literal_end = literal_start + stream.byte_offset();

    let tail = &self.text[literal_end..];
    let after_whitespace = tail.trim_start();
    if !after_whitespace.starts_with(';') {
      return Err(self.not_found());
    }
    let statement_end = literal_end + (tail.len() - after_whitespace.len()) + 1;

    if assignment_anchor().is_match(&self.text[statement_end..]) {
      return Err(PruneError::DuplicateAssignment {
        path: self.path.clone(),
      });
    }

    debug!(
      start = anchor.start(),
      end = statement_end,
      "located assetsManifest assignment"
    );

    Ok(Assignment {
      statement: anchor.start()..statement_end,
      value,
    })
  }

  /// Text with the statement at `statement` replaced by a fresh assignment of `literal`.
  pub fn rewrite(&self, statement: &Range<usize>, literal: &str) -> String {
    format!(
      "{prefix}{binding} = {literal};{suffix}",
      prefix = &self.text[..statement.start],
      binding = MANIFEST_BINDING,
      suffix = &self.text[statement.end..],
    )
  }

  /// Replace the file's entire content with `text`.
  pub fn overwrite(&self, text: &str) -> Result<(), PruneError> {
    fs::write(&self.path, text).map_err(|source| PruneError::Write {
      path: self.path.clone(),
      source,
    })
  }

  fn not_found(&self) -> PruneError {
    PruneError::NotFound {
      path: self.path.clone(),
    }
  }
}
