//! Image assets
//!
//! Every icon and cover image is read into memory before layout starts, so a
//! missing file aborts the build before any page exists. Typst sees each
//! asset under a generated virtual path (`/assets/<n>.<ext>`), which keeps
//! odd configuration paths (absolute, `..`, spaces) out of the markup.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PdfError, Result};

/// A loaded image
#[derive(Debug, Clone)]
pub struct Asset {
    /// Path inside the Typst virtual file system
    pub virtual_path: String,
    pub bytes: Vec<u8>,
}

/// In-memory images keyed by their configuration path
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    assets: BTreeMap<String, Asset>,
}

impl AssetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every path, relative to `root`. Fails on the first missing file.
    pub fn load<'p>(root: &Path, paths: impl IntoIterator<Item = &'p str>) -> Result<Self> {
        let mut store = Self::new();
        for path in paths {
            if store.contains(path) {
                continue;
            }
            let full: PathBuf = root.join(path);
            let bytes = std::fs::read(&full).map_err(|source| PdfError::MissingAsset {
                path: full.clone(),
                source,
            })?;
            debug!(asset = path, bytes = bytes.len(), "asset loaded");
            store.insert(path, bytes);
        }
        Ok(store)
    }

    /// Add an asset from memory
    pub fn insert(&mut self, path: &str, bytes: Vec<u8>) {
        if let Some(existing) = self.assets.get_mut(path) {
            existing.bytes = bytes;
            return;
        }
        let virtual_path = format!("/assets/{}{}", self.assets.len(), extension(path));
        self.assets
            .insert(path.to_string(), Asset { virtual_path, bytes });
    }

    /// Whether `path` has been loaded
    pub fn contains(&self, path: &str) -> bool {
        self.assets.contains_key(path)
    }

    /// Virtual path for a configuration path
    pub fn virtual_path(&self, path: &str) -> Result<&str> {
        self.assets
            .get(path)
            .map(|a| a.virtual_path.as_str())
            .ok_or_else(|| PdfError::AssetNotLoaded(path.to_string()))
    }

    /// All assets as `(virtual path, bytes)` for the compiler
    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.assets
            .values()
            .map(|a| (a.virtual_path.as_str(), a.bytes.as_slice()))
    }

    /// Number of assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Lower-cased extension with its dot; Typst picks the decoder from it
fn extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_reads_relative_to_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/home.PNG"), b"png").unwrap();

        let store = AssetStore::load(dir.path(), ["icons/home.PNG", "icons/home.PNG"]).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.virtual_path("icons/home.PNG").unwrap(), "/assets/0.png");
    }

    #[test]
    fn test_missing_asset_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = AssetStore::load(dir.path(), ["images/cover.jpg"]).unwrap_err();
        match err {
            PdfError::MissingAsset { path, .. } => {
                assert!(path.ends_with("images/cover.jpg"));
            }
            other => panic!("expected MissingAsset, got {:?}", other),
        }
    }

    #[test]
    fn test_unloaded_asset_lookup_fails() {
        let store = AssetStore::new();
        assert!(matches!(
            store.virtual_path("icons/none.png"),
            Err(PdfError::AssetNotLoaded(_))
        ));
    }

    #[test]
    fn test_virtual_paths_are_unique() {
        let mut store = AssetStore::new();
        store.insert("a/icon.svg", b"<svg/>".to_vec());
        store.insert("b/icon.svg", b"<svg/>".to_vec());
        let paths: Vec<&str> = store.files().map(|(p, _)| p).collect();
        assert_eq!(paths.len(), 2);
        assert_ne!(paths[0], paths[1]);
    }
}
