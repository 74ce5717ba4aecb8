//! Filesystem texture store
//!
//! Maps logical texture names (`namespace:name`) to files under a root
//! directory: `<root>/<namespace>/<name>.png`. This is the filesystem
//! stand-in for a game's resource-loading subsystem; the core only ever
//! sees the bytes it returns.

use std::path::{Path, PathBuf};

use block_mosaic::TextureError;

/// A directory tree of block textures addressed by logical name.
#[derive(Debug, Clone)]
pub struct TextureStore {
    root: PathBuf,
}

impl TextureStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a logical name to its file path.
    ///
    /// `namespace:name` maps to `<root>/<namespace>/<name>.png`; a bare
    /// name without a namespace maps to `<root>/<name>.png`.
    pub fn resolve(&self, logical: &str) -> PathBuf {
        let mut path = match logical.split_once(':') {
            Some((namespace, name)) => self.root.join(namespace).join(name),
            None => self.root.join(logical),
        };
        path.set_extension("png");
        path
    }

    /// Fetch raw texture bytes for a logical name.
    ///
    /// Failures come back as [`TextureError::Fetch`]; during palette
    /// construction the builder turns them into per-candidate skips.
    pub fn fetch(&self, logical: &str) -> Result<Vec<u8>, TextureError> {
        let path = self.resolve(logical);
        std::fs::read(&path)
            .map_err(|err| TextureError::Fetch(format!("{}: {err}", path.display())))
    }
}
