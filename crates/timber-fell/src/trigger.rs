//! Block-break notifications and the filter deciding whether felling starts.

use crate::block_kind::BlockKind;
use crate::coord::VoxelCoord;

/// Stance of the agent at the moment it broke a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Posture {
    #[default]
    Standing,
    /// Sneaking opts out of bulk felling.
    Sneaking,
}

/// Emitted by the host after an agent has broken a block.
///
/// The broken voxel is already gone from the world when this arrives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockBrokenEvent<A> {
    /// Kind of the block that was broken.
    pub kind: BlockKind,
    /// Where it was.
    pub coord: VoxelCoord,
    /// The agent that broke it.
    pub agent: A,
    /// The agent's posture at break time.
    pub posture: Posture,
}

impl<A> BlockBrokenEvent<A> {
    pub fn new(kind: impl Into<BlockKind>, coord: VoxelCoord, agent: A, posture: Posture) -> Self {
        Self {
            kind: kind.into(),
            coord,
            agent,
            posture,
        }
    }
}

/// Returns `true` if breaking this block should fell the rest of the tree.
///
/// Sneaking agents never trigger felling; otherwise the broken block must be
/// a log or stem.
pub fn should_start_fell<A>(event: &BlockBrokenEvent<A>) -> bool {
    if event.posture == Posture::Sneaking {
        return false;
    }
    event.kind.is_wood_trunk()
}
