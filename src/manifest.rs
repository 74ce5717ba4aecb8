//! Block manifest: the candidate enumeration for palette construction
//!
//! A JSON file describing the blocks a world offers: identifier, texture
//! name, collision shape and void flag. It plays the role a live block
//! registry plays in-game, which keeps palette construction reproducible
//! and testable outside any engine.
//!
//! ```json
//! {
//!   "blocks": [
//!     { "id": "minecraft:stone" },
//!     { "id": "minecraft:oak_slab", "shape": { "max": [1.0, 0.5, 1.0] } },
//!     { "id": "minecraft:air", "void": true }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use block_mosaic::{BlockCandidate, Bounds, TextureError};

use crate::error::BlockprintError;
use crate::sources::TextureStore;

/// The full candidate list for one palette build.
#[derive(Debug, Deserialize)]
pub struct BlockManifest {
    /// Candidate blocks, in palette insertion order.
    pub blocks: Vec<BlockDef>,
}

impl BlockManifest {
    /// Load and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, BlockprintError> {
        let bytes = std::fs::read(path).map_err(|source| BlockprintError::ReadFile {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| BlockprintError::Manifest {
            path: path.to_owned(),
            source,
        })
    }

    /// Bind every block definition to a texture store, producing the
    /// candidate slice `build_palette` consumes.
    pub fn candidates<'a>(&'a self, store: &'a TextureStore) -> Vec<ManifestCandidate<'a>> {
        self.blocks
            .iter()
            .map(|def| ManifestCandidate { def, store })
            .collect()
    }
}

/// One block entry in the manifest.
#[derive(Debug, Deserialize)]
pub struct BlockDef {
    /// Namespaced block identifier, e.g. `"minecraft:stone"`.
    pub id: String,

    /// Logical texture name; defaults to the block id.
    #[serde(default)]
    pub texture: Option<String>,

    /// Collision shape; defaults to the full unit cube.
    #[serde(default)]
    pub shape: ShapeDef,

    /// True for air-like blocks that occupy no material space.
    #[serde(default)]
    pub void: bool,
}

/// Collision shape descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ShapeDef {
    /// True when the block has no collision volume at all.
    #[serde(default)]
    pub empty: bool,

    /// Minimum corner of the collision box.
    #[serde(default = "ShapeDef::unit_min")]
    pub min: [f64; 3],

    /// Maximum corner of the collision box.
    #[serde(default = "ShapeDef::unit_max")]
    pub max: [f64; 3],
}

impl ShapeDef {
    fn unit_min() -> [f64; 3] {
        [0.0; 3]
    }

    fn unit_max() -> [f64; 3] {
        [1.0; 3]
    }
}

impl Default for ShapeDef {
    fn default() -> Self {
        Self {
            empty: false,
            min: Self::unit_min(),
            max: Self::unit_max(),
        }
    }
}

/// A manifest entry bound to a texture store, ready for palette building.
pub struct ManifestCandidate<'a> {
    def: &'a BlockDef,
    store: &'a TextureStore,
}

impl BlockCandidate for ManifestCandidate<'_> {
    fn identifier(&self) -> &str {
        &self.def.id
    }

    fn collision_bounds(&self) -> Option<Bounds> {
        if self.def.shape.empty {
            None
        } else {
            Some(Bounds::new(self.def.shape.min, self.def.shape.max))
        }
    }

    fn is_void(&self) -> bool {
        self.def.void
    }

    fn texture_bytes(&self) -> Result<Vec<u8>, TextureError> {
        let logical = self.def.texture.as_deref().unwrap_or(&self.def.id);
        self.store.fetch(logical)
    }
}
