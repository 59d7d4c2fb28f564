//! Read-only access to named bundled resources
//!
//! The app package ships read-only assets (per-environment backend
//! configuration, seed CSV data). Code that consumes them takes an
//! [`AssetReader`] capability instead of touching the filesystem directly,
//! so tests can substitute an in-memory implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from opening a named asset
#[derive(Error, Debug)]
pub enum AssetError {
    /// No asset with the given name exists
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The asset exists but could not be read
    #[error("failed to read asset {name}: {source}")]
    Io {
        /// Asset name
        name: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    /// True when the failure is a missing asset rather than a read error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Capability to open a named bundled resource as bytes
pub trait AssetReader {
    /// Open the asset with the given name and return its contents
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError>;

    /// Open an asset and decode it as UTF-8, replacing invalid sequences
    fn open_string(&self, name: &str) -> Result<String, AssetError> {
        let bytes = self.open(name)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Asset reader backed by a directory on disk
///
/// Asset names are plain file names; path separators in a name are
/// rejected so a name can never escape the asset root.
#[derive(Debug, Clone)]
pub struct DirAssetReader {
    root: PathBuf,
}

impl DirAssetReader {
    /// Create a reader rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The asset root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetReader for DirAssetReader {
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        if name.contains('/') || name.contains('\\') {
            return Err(AssetError::NotFound(name.to_string()));
        }

        let path = self.root.join(name);
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound(name.to_string()),
            _ => AssetError::Io {
                name: name.to_string(),
                source: e,
            },
        })
    }
}

/// In-memory asset reader for tests and embedded defaults
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    entries: HashMap<String, Vec<u8>>,
}

impl StaticAssets {
    /// Create an empty asset set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset, replacing any previous entry with the same name
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(name.into(), contents.into());
        self
    }

    /// Number of assets registered
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no assets are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetReader for StaticAssets {
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_static_assets_roundtrip() {
        let assets = StaticAssets::new().with("hello.txt", "hi there");
        assert_eq!(assets.open_string("hello.txt").unwrap(), "hi there");
    }

    #[test]
    fn test_static_assets_missing() {
        let assets = StaticAssets::new();
        let err = assets.open("nope.json").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_dir_reader_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("data.csv")).unwrap();
        writeln!(f, "a,b,c").unwrap();

        let reader = DirAssetReader::new(dir.path());
        let text = reader.open_string("data.csv").unwrap();
        assert!(text.starts_with("a,b,c"));
    }

    #[test]
    fn test_dir_reader_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let reader = DirAssetReader::new(dir.path());
        assert!(reader.open("absent.json").unwrap_err().is_not_found());
    }

    #[test]
    fn test_dir_reader_rejects_path_separators() {
        let dir = tempfile::tempdir().unwrap();
        let reader = DirAssetReader::new(dir.path());
        assert!(reader.open("../escape.json").unwrap_err().is_not_found());
    }
}
