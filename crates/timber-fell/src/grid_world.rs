//! In-memory [`World`] backed by a sparse voxel map.
//!
//! Used by the demo binary and the test suites. Missing voxels read as air.
//! An optional loaded region and explicit holes model voxels the host cannot
//! resolve, and destroy/gather failures can be injected per coordinate.

use std::cell::RefCell;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::block_kind::BlockKind;
use crate::coord::VoxelCoord;
use crate::world::{World, WorldError};

/// Identifies an agent (player) in a [`GridWorld`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u64);

/// An item lying in the world after a voxel was harvested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedItem {
    /// Voxel the item dropped from.
    pub origin: VoxelCoord,
    /// Kind of the harvested voxel.
    pub kind: BlockKind,
}

/// Sparse voxel world with drop tracking and failure injection.
#[derive(Debug, Default)]
pub struct GridWorld {
    voxels: FxHashMap<VoxelCoord, BlockKind>,
    /// Inclusive `(min, max)` bounds of the loaded area; `None` means unbounded.
    loaded_region: Option<(VoxelCoord, VoxelCoord)>,
    unloaded: FxHashSet<VoxelCoord>,
    failing_destroys: FxHashSet<VoxelCoord>,
    gathering_disabled: bool,
    drops: Vec<DroppedItem>,
    inventories: FxHashMap<AgentId, Vec<BlockKind>>,
    destroyed: Vec<VoxelCoord>,
    gather_requests: Vec<VoxelCoord>,
    reads: RefCell<FxHashMap<VoxelCoord, u32>>,
}

impl GridWorld {
    /// Creates an empty, unbounded world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `kind` at `coord`, replacing whatever was there.
    pub fn set(&mut self, coord: VoxelCoord, kind: impl Into<BlockKind>) {
        self.voxels.insert(coord, kind.into());
    }

    /// Fills the inclusive box `min..=max` with `kind`.
    pub fn fill_box(&mut self, min: VoxelCoord, max: VoxelCoord, kind: impl Into<BlockKind>) {
        let kind = kind.into();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.voxels.insert(VoxelCoord::new(x, y, z), kind.clone());
                }
            }
        }
    }

    /// Returns the kind stored at `coord`, or `None` for air.
    ///
    /// Unlike [`World::read_voxel`] this ignores load state and is not counted.
    pub fn get(&self, coord: VoxelCoord) -> Option<&BlockKind> {
        self.voxels.get(&coord)
    }

    /// Number of non-air voxels.
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Restricts the loaded area to the inclusive box `min..=max`.
    pub fn set_loaded_region(&mut self, min: VoxelCoord, max: VoxelCoord) {
        self.loaded_region = Some((min, max));
    }

    /// Marks a single voxel as unresolvable.
    pub fn mark_unloaded(&mut self, coord: VoxelCoord) {
        self.unloaded.insert(coord);
    }

    /// Makes every destroy request at `coord` fail.
    pub fn fail_destroy_at(&mut self, coord: VoxelCoord) {
        self.failing_destroys.insert(coord);
    }

    /// Enables or disables item gathering.
    pub fn set_gathering_enabled(&mut self, enabled: bool) {
        self.gathering_disabled = !enabled;
    }

    /// Returns `true` if `coord` can be read.
    pub fn is_loaded(&self, coord: VoxelCoord) -> bool {
        if self.unloaded.contains(&coord) {
            return false;
        }
        match self.loaded_region {
            Some((min, max)) => {
                (min.x..=max.x).contains(&coord.x)
                    && (min.y..=max.y).contains(&coord.y)
                    && (min.z..=max.z).contains(&coord.z)
            }
            None => true,
        }
    }

    /// Coordinates destroyed so far, in destruction order.
    pub fn destroyed(&self) -> &[VoxelCoord] {
        &self.destroyed
    }

    /// Items still lying in the world.
    pub fn drops(&self) -> &[DroppedItem] {
        &self.drops
    }

    /// Items gathered by `agent`.
    pub fn inventory(&self, agent: AgentId) -> &[BlockKind] {
        self.inventories
            .get(&agent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Centers of all gather requests, in call order.
    pub fn gather_requests(&self) -> &[VoxelCoord] {
        &self.gather_requests
    }

    /// How many times [`World::read_voxel`] was called for `coord`.
    pub fn read_count(&self, coord: VoxelCoord) -> u32 {
        self.reads.borrow().get(&coord).copied().unwrap_or(0)
    }

    /// Total [`World::read_voxel`] calls.
    pub fn total_reads(&self) -> u32 {
        self.reads.borrow().values().sum()
    }
}

impl World for GridWorld {
    type Agent = AgentId;

    fn read_voxel(&self, coord: VoxelCoord) -> Result<BlockKind, WorldError> {
        *self.reads.borrow_mut().entry(coord).or_insert(0) += 1;
        if !self.is_loaded(coord) {
            return Err(WorldError::NotLoaded(coord));
        }
        Ok(self.voxels.get(&coord).cloned().unwrap_or_else(BlockKind::air))
    }

    fn destroy_voxel(&mut self, coord: VoxelCoord) -> Result<(), WorldError> {
        if !self.is_loaded(coord) || self.failing_destroys.contains(&coord) {
            return Err(WorldError::DestroyFailed(coord));
        }
        let Some(kind) = self.voxels.remove(&coord) else {
            return Err(WorldError::DestroyFailed(coord));
        };
        self.drops.push(DroppedItem {
            origin: coord,
            kind,
        });
        self.destroyed.push(coord);
        Ok(())
    }

    fn gather_items(
        &mut self,
        center: VoxelCoord,
        radius: u32,
        agent: &AgentId,
    ) -> Result<(), WorldError> {
        self.gather_requests.push(center);
        if self.gathering_disabled {
            return Err(WorldError::NoItemsOrUnavailable(center));
        }

        // i128 holds the squared span of the whole i32 grid without overflow.
        let r2 = i128::from(radius) * i128::from(radius);
        let within = |item: &DroppedItem| {
            let dx = i128::from(item.origin.x) - i128::from(center.x);
            let dy = i128::from(item.origin.y) - i128::from(center.y);
            let dz = i128::from(item.origin.z) - i128::from(center.z);
            dx * dx + dy * dy + dz * dz <= r2
        };

        let (near, far): (Vec<_>, Vec<_>) = self.drops.drain(..).partition(within);
        self.drops = far;
        if near.is_empty() {
            return Err(WorldError::NoItemsOrUnavailable(center));
        }
        self.inventories
            .entry(*agent)
            .or_default()
            .extend(near.into_iter().map(|item| item.kind));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: AgentId = AgentId(1);

    #[test]
    fn test_missing_voxel_reads_as_air() {
        let world = GridWorld::new();
        let kind = world.read_voxel(VoxelCoord::new(3, 3, 3)).unwrap();
        assert_eq!(kind, BlockKind::air());
    }

    #[test]
    fn test_loaded_region_bounds_reads() {
        let mut world = GridWorld::new();
        world.set_loaded_region(VoxelCoord::new(0, 0, 0), VoxelCoord::new(15, 255, 15));
        assert!(world.read_voxel(VoxelCoord::new(15, 0, 15)).is_ok());
        assert_eq!(
            world.read_voxel(VoxelCoord::new(16, 0, 0)),
            Err(WorldError::NotLoaded(VoxelCoord::new(16, 0, 0)))
        );
    }

    #[test]
    fn test_mark_unloaded_hole() {
        let mut world = GridWorld::new();
        let c = VoxelCoord::new(1, 2, 3);
        world.set(c, "oak_log");
        world.mark_unloaded(c);
        assert_eq!(world.read_voxel(c), Err(WorldError::NotLoaded(c)));
        assert_eq!(world.read_count(c), 1);
    }

    #[test]
    fn test_destroy_leaves_drop() {
        let mut world = GridWorld::new();
        let c = VoxelCoord::new(0, 5, 0);
        world.set(c, "oak_log");
        world.destroy_voxel(c).unwrap();
        assert_eq!(world.get(c), None);
        assert_eq!(world.destroyed(), &[c]);
        assert_eq!(world.drops().len(), 1);
        assert_eq!(world.drops()[0].kind, BlockKind::new("oak_log"));
    }

    #[test]
    fn test_destroy_air_fails() {
        let mut world = GridWorld::new();
        let c = VoxelCoord::new(0, 0, 0);
        assert_eq!(world.destroy_voxel(c), Err(WorldError::DestroyFailed(c)));
    }

    #[test]
    fn test_injected_destroy_failure_keeps_voxel() {
        let mut world = GridWorld::new();
        let c = VoxelCoord::new(0, 0, 0);
        world.set(c, "oak_leaves");
        world.fail_destroy_at(c);
        assert!(world.destroy_voxel(c).is_err());
        assert_eq!(world.get(c), Some(&BlockKind::new("oak_leaves")));
        assert!(world.drops().is_empty());
    }

    #[test]
    fn test_gather_moves_items_within_radius() {
        let mut world = GridWorld::new();
        let near = VoxelCoord::new(0, 0, 3);
        let far = VoxelCoord::new(0, 0, 9);
        world.set(near, "oak_log");
        world.set(far, "birch_log");
        world.destroy_voxel(near).unwrap();
        world.destroy_voxel(far).unwrap();

        world.gather_items(VoxelCoord::new(0, 0, 0), 4, &PLAYER).unwrap();
        assert_eq!(world.inventory(PLAYER), &[BlockKind::new("oak_log")]);
        assert_eq!(world.drops().len(), 1);
        assert_eq!(world.drops()[0].origin, far);
    }

    #[test]
    fn test_gather_with_nothing_nearby_errors() {
        let mut world = GridWorld::new();
        let center = VoxelCoord::new(0, 0, 0);
        assert_eq!(
            world.gather_items(center, 4, &PLAYER),
            Err(WorldError::NoItemsOrUnavailable(center))
        );
        assert_eq!(world.gather_requests(), &[center]);
    }

    #[test]
    fn test_gather_with_max_radius() {
        let mut world = GridWorld::new();
        let c = VoxelCoord::new(5, 64, -5);
        world.set(c, "oak_log");
        world.destroy_voxel(c).unwrap();

        world.gather_items(VoxelCoord::new(0, 64, 0), u32::MAX, &PLAYER).unwrap();
        assert_eq!(world.inventory(PLAYER), &[BlockKind::new("oak_log")]);
    }

    #[test]
    fn test_gather_across_whole_grid() {
        let mut world = GridWorld::new();
        let west = VoxelCoord::new(i32::MIN, 0, 0);
        let corner = VoxelCoord::new(i32::MIN, i32::MIN, 0);
        world.set(west, "oak_log");
        world.set(corner, "birch_log");
        world.destroy_voxel(west).unwrap();
        world.destroy_voxel(corner).unwrap();

        // Exactly u32::MAX away along x; the corner is farther.
        world
            .gather_items(VoxelCoord::new(i32::MAX, 0, 0), u32::MAX, &PLAYER)
            .unwrap();
        assert_eq!(world.inventory(PLAYER), &[BlockKind::new("oak_log")]);
        assert_eq!(world.drops().len(), 1);
        assert_eq!(world.drops()[0].origin, corner);
    }

    #[test]
    fn test_gather_disabled() {
        let mut world = GridWorld::new();
        let c = VoxelCoord::new(0, 0, 0);
        world.set(c, "oak_log");
        world.destroy_voxel(c).unwrap();
        world.set_gathering_enabled(false);
        assert!(world.gather_items(c, 4, &PLAYER).is_err());
        assert!(world.inventory(PLAYER).is_empty());
        assert_eq!(world.drops().len(), 1);
    }

    #[test]
    fn test_fill_box() {
        let mut world = GridWorld::new();
        world.fill_box(VoxelCoord::new(-1, 0, -1), VoxelCoord::new(1, 1, 1), "oak_leaves");
        assert_eq!(world.voxel_count(), 18);
    }
}
