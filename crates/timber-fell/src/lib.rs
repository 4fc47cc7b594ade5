//! Tree felling for voxel worlds: break one log, fell the whole tree.
//!
//! A [`BlockBrokenEvent`] passes through [`should_start_fell`]; accepted
//! events start a [`FellJob`], a bounded breadth-first flood fill over the
//! 26 neighbors of each accepted voxel. Same-species trunk voxels and all
//! foliage-like voxels are destroyed through the host's [`World`] and their
//! drops gathered toward the agent.

pub mod block_kind;
pub mod coord;
pub mod feller;
pub mod grid_world;
pub mod host;
pub mod trigger;
pub mod world;

pub use block_kind::BlockKind;
pub use coord::{NEIGHBOR_OFFSETS_26, VoxelCoord};
pub use feller::{
    DEFAULT_GATHER_RADIUS, DEFAULT_MAX_BREAK_COUNT, FellJob, FellReport, FellSettings, StopReason,
    fell,
};
pub use grid_world::{AgentId, DroppedItem, GridWorld};
pub use host::{FellScheduler, on_trunk_broken};
pub use trigger::{BlockBrokenEvent, Posture, should_start_fell};
pub use world::{World, WorldError};
