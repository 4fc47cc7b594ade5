//! Block kind identifiers and the tree classification predicates.
//!
//! Kinds are opaque namespaced strings (`minecraft:oak_log`). Nothing here
//! enumerates species: trunks and foliage are recognized by identifier
//! markers, so modded or future wood types classify the same way.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Namespace assumed for identifiers written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Overworld log marker (`oak_log`, `stripped_birch_log`, ...).
pub const LOG_MARKER: &str = "_log";
/// Nether trunk marker (`crimson_stem`, `warped_stem`, `mushroom_stem`).
pub const STEM_MARKER: &str = "_stem";
/// Leaf marker (`oak_leaves`, `azalea_leaves`, ...).
pub const LEAVES_MARKER: &str = "_leaves";
/// Nether canopy marker (`nether_wart_block`, `warped_wart_block`).
pub const WART_BLOCK_MARKER: &str = "wart_block";
/// The luminous fungus block that grows inside nether canopies.
pub const SHROOMLIGHT: &str = "minecraft:shroomlight";

// ---------------------------------------------------------------------------
// BlockKind
// ---------------------------------------------------------------------------

/// Canonical identifier of a voxel's material.
///
/// Construction trims whitespace, lowercases ASCII and prefixes
/// [`DEFAULT_NAMESPACE`] when the identifier has no `namespace:` part, so
/// `"oak_log"` and `"minecraft:oak_log"` compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct BlockKind(String);

impl BlockKind {
    pub fn new(id: impl AsRef<str>) -> Self {
        let trimmed = id.as_ref().trim().to_ascii_lowercase();
        if trimmed.contains(':') {
            Self(trimmed)
        } else {
            Self(format!("{DEFAULT_NAMESPACE}:{trimmed}"))
        }
    }

    /// Air, as reported by most hosts for empty voxels.
    pub fn air() -> Self {
        Self::new("air")
    }

    /// The full canonical identifier, namespace included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace portion (`minecraft` for `minecraft:oak_log`).
    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map_or("", |(ns, _)| ns)
    }

    /// Path portion (`oak_log` for `minecraft:oak_log`).
    pub fn path(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(_, path)| path)
    }

    /// Returns `true` for log and stem blocks of any species.
    pub fn is_wood_trunk(&self) -> bool {
        self.0.contains(LOG_MARKER) || self.0.contains(STEM_MARKER)
    }

    /// Returns `true` for leaves, wart blocks and shroomlight.
    pub fn is_foliage_like(&self) -> bool {
        self.0.contains(LEAVES_MARKER) || self.0.contains(WART_BLOCK_MARKER) || self.0 == SHROOMLIGHT
    }

    /// Returns `true` only for the exact same kind as `origin`.
    ///
    /// Unlike [`is_wood_trunk`](Self::is_wood_trunk), a spruce log touching
    /// an oak does not match the oak.
    pub fn is_target_trunk(&self, origin: &BlockKind) -> bool {
        self == origin
    }

    /// Whether this voxel is part of the tree rooted at `origin`.
    pub fn belongs_to_tree(&self, origin: &BlockKind) -> bool {
        self.is_target_trunk(origin) || self.is_foliage_like()
    }
}

impl From<String> for BlockKind {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for BlockKind {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.0
    }
}

impl AsRef<str> for BlockKind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
