//! Bounded breadth-first flood fill that fells a tree from one broken trunk voxel.
//!
//! Starting at the broken voxel, the feller expands over 26-connected
//! neighbors in FIFO order. A neighbor joins the tree if it is the same trunk
//! kind as the origin or is foliage-like; joined voxels are destroyed,
//! nearby drops are gathered toward the agent, and the voxel is queued for
//! expansion. The job stops when the frontier empties or after
//! `max_break_count` voxels have been accepted, whichever comes first.
//!
//! Rejected neighbors are not recorded as visited, so a voxel adjacent to
//! several accepted voxels is read once per discovery.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::block_kind::BlockKind;
use crate::coord::VoxelCoord;
use crate::world::World;

/// Default cap on voxels broken by one job.
pub const DEFAULT_MAX_BREAK_COUNT: u32 = 300;

/// Default radius, in voxels, around each broken voxel to gather drops from.
pub const DEFAULT_GATHER_RADIUS: u32 = 4;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Tunables for a single fell job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FellSettings {
    /// Maximum number of voxels (excluding the origin) broken per job.
    pub max_break_count: u32,
    /// Gather radius passed to [`World::gather_items`].
    pub gather_radius: u32,
}

impl Default for FellSettings {
    fn default() -> Self {
        Self {
            max_break_count: DEFAULT_MAX_BREAK_COUNT,
            gather_radius: DEFAULT_GATHER_RADIUS,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Why a fell job stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Every connected tree voxel was reached within the budget.
    FrontierExhausted,
    /// `max_break_count` voxels were accepted; the rest of the tree is untouched.
    BudgetExhausted,
}

/// Outcome of one fell job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FellReport {
    /// The broken voxel the job started from.
    pub origin: VoxelCoord,
    /// Accepted voxels in acceptance (breadth-first) order.
    pub broken: Vec<VoxelCoord>,
    /// Neighbor reads that failed because the voxel was not loaded.
    pub unloaded_skips: u32,
    /// Accepted voxels the world failed to destroy.
    pub destroy_failures: u32,
    /// Gather requests that found nothing or were unavailable.
    pub gather_failures: u32,
    /// Size of the visited set when the job ended (origin included).
    pub visited_count: usize,
    pub stop_reason: StopReason,
}

impl FellReport {
    fn new(origin: VoxelCoord) -> Self {
        Self {
            origin,
            broken: Vec::new(),
            unloaded_skips: 0,
            destroy_failures: 0,
            gather_failures: 0,
            visited_count: 1,
            stop_reason: StopReason::FrontierExhausted,
        }
    }

    /// Number of voxels accepted by the job.
    pub fn break_count(&self) -> usize {
        self.broken.len()
    }
}

// ---------------------------------------------------------------------------
// FellJob
// ---------------------------------------------------------------------------

/// State of one fell operation: origin, remaining budget, frontier and visited set.
///
/// Created when a break event is accepted and consumed by [`FellJob::run`].
#[derive(Clone, Debug)]
pub struct FellJob {
    origin: VoxelCoord,
    origin_kind: BlockKind,
    settings: FellSettings,
    remaining_budget: u32,
    frontier: VecDeque<VoxelCoord>,
    visited: FxHashSet<VoxelCoord>,
}

impl FellJob {
    /// Seeds a job with the origin as the only frontier and visited entry.
    pub fn new(origin: VoxelCoord, origin_kind: BlockKind, settings: FellSettings) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back(origin);
        let mut visited = FxHashSet::default();
        visited.insert(origin);

        Self {
            origin,
            origin_kind,
            settings,
            remaining_budget: settings.max_break_count,
            frontier,
            visited,
        }
    }

    pub fn origin(&self) -> VoxelCoord {
        self.origin
    }

    pub fn origin_kind(&self) -> &BlockKind {
        &self.origin_kind
    }

    pub fn settings(&self) -> FellSettings {
        self.settings
    }

    /// Voxels this job may still break.
    pub fn remaining_budget(&self) -> u32 {
        self.remaining_budget
    }

    /// Runs the flood fill to completion against `world`.
    ///
    /// Never fails: unloaded neighbors are skipped and destroy or gather
    /// failures are counted in the report. Voxels already destroyed stay
    /// destroyed.
    pub fn run<W: World>(mut self, world: &mut W, agent: &W::Agent) -> FellReport {
        let mut report = FellReport::new(self.origin);

        'expand: while self.remaining_budget > 0 {
            let Some(current) = self.frontier.pop_front() else {
                break;
            };

            for next in current.neighbors() {
                // Past the edge of the i32 grid nothing is loaded.
                let Some(next) = next else {
                    report.unloaded_skips += 1;
                    continue;
                };
                if self.visited.contains(&next) {
                    continue;
                }

                let kind = match world.read_voxel(next) {
                    Ok(kind) => kind,
                    Err(err) => {
                        tracing::trace!("skipping neighbor: {}", err);
                        report.unloaded_skips += 1;
                        continue;
                    }
                };

                if !kind.belongs_to_tree(&self.origin_kind) {
                    continue;
                }

                if let Err(err) = world.destroy_voxel(next) {
                    tracing::debug!("{}", err);
                    report.destroy_failures += 1;
                }
                if let Err(err) = world.gather_items(next, self.settings.gather_radius, agent) {
                    tracing::trace!("{}", err);
                    report.gather_failures += 1;
                }

                self.visited.insert(next);
                self.frontier.push_back(next);
                self.remaining_budget -= 1;
                report.broken.push(next);
                tracing::trace!("felled {} at {}", kind, next);

                if self.remaining_budget == 0 {
                    break 'expand;
                }
            }
        }

        report.visited_count = self.visited.len();
        report.stop_reason = if self.remaining_budget == 0 {
            StopReason::BudgetExhausted
        } else {
            StopReason::FrontierExhausted
        };

        tracing::debug!(
            "fell job at {} ({}) finished: {} broken, {} unloaded, {:?}",
            self.origin,
            self.origin_kind,
            report.broken.len(),
            report.unloaded_skips,
            report.stop_reason,
        );

        report
    }
}

/// Fells the tree connected to `origin`, breaking at most `max_break_count` voxels.
///
/// `origin` is the voxel the agent already broke; it is never destroyed here.
/// Uses [`DEFAULT_GATHER_RADIUS`]; build a [`FellJob`] directly for other radii.
pub fn fell<W: World>(
    origin: VoxelCoord,
    origin_kind: BlockKind,
    world: &mut W,
    agent: &W::Agent,
    max_break_count: u32,
) -> FellReport {
    let settings = FellSettings {
        max_break_count,
        ..FellSettings::default()
    };
    FellJob::new(origin, origin_kind, settings).run(world, agent)
}

#[cfg(test)]
#[path = "feller_tests.rs"]
mod tests;
