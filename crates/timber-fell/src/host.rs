//! Host-facing entry points: immediate felling and a deferred job queue.
//!
//! The host forwards its block-break notifications here together with the
//! world and agent handles; nothing is registered globally. Hosts that run
//! work on a later tick use [`FellScheduler`], which queues accepted jobs and
//! runs each one to completion when drained.

use std::collections::VecDeque;

use crate::feller::{FellJob, FellReport, FellSettings};
use crate::trigger::{BlockBrokenEvent, should_start_fell};
use crate::world::World;

/// Filters `event` and, if accepted, fells the tree right away.
///
/// Returns `None` when the filter rejects the event (sneaking agent or a
/// non-trunk block).
pub fn on_trunk_broken<W: World>(
    event: &BlockBrokenEvent<W::Agent>,
    world: &mut W,
    settings: FellSettings,
) -> Option<FellReport> {
    if !should_start_fell(event) {
        tracing::trace!("break of {} at {} ignored", event.kind, event.coord);
        return None;
    }
    let job = FellJob::new(event.coord, event.kind.clone(), settings);
    Some(job.run(world, &event.agent))
}

/// FIFO queue of accepted fell jobs awaiting execution.
///
/// Each job runs uninterrupted when drained. Jobs are not checked for
/// overlap; the host must not queue two jobs on the same tree.
pub struct FellScheduler<A> {
    pending: VecDeque<(FellJob, A)>,
}

impl<A> FellScheduler<A> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Queues a prepared job on behalf of `agent`.
    pub fn submit(&mut self, job: FellJob, agent: A) {
        self.pending.push_back((job, agent));
    }

    /// Filters `event` and queues a job if accepted. Returns whether it was queued.
    pub fn on_trunk_broken(&mut self, event: BlockBrokenEvent<A>, settings: FellSettings) -> bool {
        if !should_start_fell(&event) {
            return false;
        }
        let job = FellJob::new(event.coord, event.kind, settings);
        self.submit(job, event.agent);
        true
    }

    /// Number of queued jobs.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Runs every queued job in submission order and returns their reports.
    pub fn run_pending<W>(&mut self, world: &mut W) -> Vec<FellReport>
    where
        W: World<Agent = A>,
    {
        let mut reports = Vec::with_capacity(self.pending.len());
        while let Some((job, agent)) = self.pending.pop_front() {
            reports.push(job.run(world, &agent));
        }
        if !reports.is_empty() {
            tracing::debug!("ran {} fell job(s)", reports.len());
        }
        reports
    }

    /// Drops all queued jobs without running them.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<A> Default for FellScheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
