//! The host world capability consumed by the feller.

use thiserror::Error;

use crate::block_kind::BlockKind;
use crate::coord::VoxelCoord;

/// Failures reported by a [`World`] implementation.
///
/// None of these abort a fell job; they are tallied in the
/// [`FellReport`](crate::FellReport) and the job moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The voxel is outside the loaded area or cannot be resolved.
    #[error("voxel {0} is not loaded")]
    NotLoaded(VoxelCoord),
    /// The host refused or failed to break the voxel.
    #[error("failed to destroy voxel {0}")]
    DestroyFailed(VoxelCoord),
    /// No dropped items near the center, or item gathering is unavailable.
    #[error("no items to gather around {0}")]
    NoItemsOrUnavailable(VoxelCoord),
}

/// Per-voxel access to the host world.
///
/// Calls are synchronous. The feller never holds the world across jobs and
/// never calls it concurrently.
pub trait World {
    /// Handle identifying the agent that items are gathered toward.
    type Agent;

    /// Returns the kind of the voxel at `coord`.
    fn read_voxel(&self, coord: VoxelCoord) -> Result<BlockKind, WorldError>;

    /// Breaks the voxel at `coord` as if harvested, leaving its drops in the world.
    fn destroy_voxel(&mut self, coord: VoxelCoord) -> Result<(), WorldError>;

    /// Moves dropped items within `radius` voxels of `center` to `agent`.
    fn gather_items(
        &mut self,
        center: VoxelCoord,
        radius: u32,
        agent: &Self::Agent,
    ) -> Result<(), WorldError>;
}
