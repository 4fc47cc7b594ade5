//! Integer voxel coordinates and the 26-neighbor offset table.

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Absolute position of a single voxel in the world grid.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate shifted by `(dx, dy, dz)`.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Like [`offset`](Self::offset), but `None` when any axis leaves the `i32` range.
    pub const fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        let (Some(x), Some(y), Some(z)) = (
            self.x.checked_add(dx),
            self.y.checked_add(dy),
            self.z.checked_add(dz),
        ) else {
            return None;
        };
        Some(Self { x, y, z })
    }

    /// Chebyshev distance: the number of 26-connected steps between two voxels.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }

    /// Iterates over the 26 neighbor slots in [`NEIGHBOR_OFFSETS_26`] order.
    /// Slots beyond the `i32` range yield `None`.
    pub fn neighbors(self) -> impl Iterator<Item = Option<VoxelCoord>> {
        NEIGHBOR_OFFSETS_26
            .iter()
            .map(move |&(dx, dy, dz)| self.checked_offset(dx, dy, dz))
    }
}

impl Add<(i32, i32, i32)> for VoxelCoord {
    type Output = Self;

    fn add(self, (dx, dy, dz): (i32, i32, i32)) -> Self {
        self.offset(dx, dy, dz)
    }
}

impl From<(i32, i32, i32)> for VoxelCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl std::fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Every face, edge and corner neighbor offset.
///
/// Ordered as three nested ranges over `-1..=1` (x outermost, z innermost)
/// with the zero offset removed. Traversal order depends on this ordering.
pub const NEIGHBOR_OFFSETS_26: [(i32, i32, i32); 26] = build_neighbor_offsets();

const fn build_neighbor_offsets() -> [(i32, i32, i32); 26] {
    let mut out = [(0, 0, 0); 26];
    let mut i = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if !(dx == 0 && dy == 0 && dz == 0) {
                    out[i] = (dx, dy, dz);
                    i += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
