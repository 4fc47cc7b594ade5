//! Hand-authored demo worlds loaded from RON.
//!
//! ```ron
//! (
//!     origin: (x: 0, y: 64, z: 0),
//!     origin_kind: "oak_log",
//!     boxes: [(min: (x: -2, y: 68, z: -2), max: (x: 2, y: 69, z: 2), kind: "oak_leaves")],
//!     blocks: [(at: (x: 0, y: 65, z: 0), kind: "oak_log")],
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use timber_fell::{BlockKind, GridWorld, VoxelCoord};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to parse scene: {0}")]
    Parse(#[source] ron::error::SpannedError),
}

/// A single placed voxel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBlock {
    pub at: VoxelCoord,
    pub kind: BlockKind,
}

/// An inclusive box filled with one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBox {
    pub min: VoxelCoord,
    pub max: VoxelCoord,
    pub kind: BlockKind,
}

/// The world around one break event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Where the player breaks the first trunk voxel.
    pub origin: VoxelCoord,
    /// Kind of the voxel broken at `origin`.
    pub origin_kind: BlockKind,
    /// Inclusive loaded bounds; everything outside reads as not loaded.
    #[serde(default)]
    pub loaded_region: Option<(VoxelCoord, VoxelCoord)>,
    /// Filled first, in order.
    #[serde(default)]
    pub boxes: Vec<SceneBox>,
    /// Placed after the boxes, overriding them.
    #[serde(default)]
    pub blocks: Vec<SceneBlock>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path).map_err(SceneError::Read)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, SceneError> {
        ron::from_str(contents).map_err(SceneError::Parse)
    }

    /// Builds the world. The origin voxel is left empty, as after a break.
    pub fn build_world(&self) -> GridWorld {
        let mut world = GridWorld::new();
        if let Some((min, max)) = self.loaded_region {
            world.set_loaded_region(min, max);
        }
        for b in &self.boxes {
            world.fill_box(b.min, b.max, b.kind.clone());
        }
        for block in &self.blocks {
            world.set(block.at, block.kind.clone());
        }
        if world.get(self.origin).is_some() {
            tracing::warn!("scene places a voxel at the origin {}; it stays in place", self.origin);
        }
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"(
        origin: (x: 0, y: 64, z: 0),
        origin_kind: "oak_log",
        loaded_region: Some(((x: -8, y: 0, z: -8), (x: 8, y: 80, z: 8))),
        boxes: [(min: (x: -1, y: 67, z: -1), max: (x: 1, y: 67, z: 1), kind: "oak_leaves")],
        blocks: [
            (at: (x: 0, y: 65, z: 0), kind: "oak_log"),
            (at: (x: 0, y: 66, z: 0), kind: "oak_log"),
            (at: (x: 0, y: 67, z: 0), kind: "oak_log"),
        ],
    )"#;

    #[test]
    fn test_parse_sample_scene() {
        let scene = Scene::parse(SAMPLE).unwrap();
        assert_eq!(scene.origin, VoxelCoord::new(0, 64, 0));
        assert_eq!(scene.origin_kind, BlockKind::new("minecraft:oak_log"));
        assert_eq!(scene.boxes.len(), 1);
        assert_eq!(scene.blocks.len(), 3);
    }

    #[test]
    fn test_build_world_applies_blocks_over_boxes() {
        let world = Scene::parse(SAMPLE).unwrap().build_world();
        assert_eq!(world.voxel_count(), 9 + 2);
        assert_eq!(world.get(VoxelCoord::new(0, 67, 0)), Some(&BlockKind::new("oak_log")));
        assert!(!world.is_loaded(VoxelCoord::new(9, 64, 0)));
    }

    #[test]
    fn test_optional_sections_default() {
        let scene = Scene::parse(r#"(origin: (x: 1, y: 2, z: 3), origin_kind: "crimson_stem")"#)
            .unwrap();
        assert!(scene.blocks.is_empty());
        assert!(scene.loaded_region.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Scene::load(&dir.path().join("missing.ron"));
        assert!(matches!(result, Err(SceneError::Read(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.ron");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(Scene::load(&path).unwrap(), Scene::parse(SAMPLE).unwrap());
    }

    #[test]
    fn test_invalid_scene_errors() {
        assert!(matches!(Scene::parse("(origin: 5)"), Err(SceneError::Parse(_))));
    }
}
