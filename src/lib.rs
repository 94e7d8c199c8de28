#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod exclusions;
pub mod manifest;
pub mod pruner;

pub use document::{ManifestDocument, MANIFEST_BINDING};
pub use error::PruneError;
pub use exclusions::{DEFAULT_EXCLUSIONS, ExclusionSet};
pub use manifest::{AssetEntry, AssetManifest};
pub use pruner::{ManifestAssetPruner, PruneReport};
