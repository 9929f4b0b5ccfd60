//! Greedy 2-approximation for jobs with arbitrary integer durations.
//!
//! Starts from the fully open candidate timeline and sweeps the timestamps
//! in increasing order, closing every slot whose removal keeps the
//! remaining open set feasible. Feasibility of an open set is the max-flow
//! assignment check, so the sweep never closes a slot it cannot afford and
//! reports infeasibility exactly when the complete timeline itself is
//! infeasible. The surviving open set is within a factor of two of the
//! optimal number of active slots.
//!
//! The two schedulers make identical closing decisions and produce
//! identical schedules; they differ only in how the open set is stored:
//!
//! - [`GreedyScheduler`] flags every candidate timestamp individually.
//! - [`GreedyIntervalsScheduler`] keeps the open set as a sorted list of
//!   maximal contiguous batches, splitting and re-merging them as single
//!   slots close and reopen.

use crate::flow;
use crate::model::{Job, JobPool, Pool, Schedule, TimeInterval};

use super::SchedulerError;

/// Timestamp-granular sweep-and-close scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyScheduler;

impl GreedyScheduler {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, pool: &JobPool, max_concurrency: u32) -> Result<Schedule, SchedulerError> {
        run::<FlaggedSlots>(pool.jobs(), max_concurrency)
    }
}

/// Interval-granular sweep-and-close scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyIntervalsScheduler;

impl GreedyIntervalsScheduler {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, pool: &JobPool, max_concurrency: u32) -> Result<Schedule, SchedulerError> {
        run::<BatchedSlots>(pool.jobs(), max_concurrency)
    }
}

/// Mutable open-slot set a sweep runs against.
trait OpenSlots {
    fn from_candidates(candidates: &[u32]) -> Self;

    fn close(&mut self, t: u32);

    /// Reverts a close of `t`.
    fn reopen(&mut self, t: u32);

    /// Currently open slots, ascending.
    fn open_slots(&self) -> Vec<u32>;
}

fn run<S: OpenSlots>(jobs: &[Job], max_concurrency: u32) -> Result<Schedule, SchedulerError> {
    if max_concurrency == 0 {
        return Err(SchedulerError::InvalidConcurrency);
    }

    let mut candidates: Vec<u32> = jobs
        .iter()
        .filter(|job| job.duration() > 0)
        .flat_map(|job| job.available_timestamps())
        .collect();
    candidates.sort_unstable();
    candidates.dedup();

    if !flow::is_feasible(jobs, &candidates, max_concurrency) {
        return Ok(Schedule::infeasible());
    }

    let mut open = S::from_candidates(&candidates);
    for &t in &candidates {
        open.close(t);
        if !flow::is_feasible(jobs, &open.open_slots(), max_concurrency) {
            open.reopen(t);
        }
    }

    match flow::assign_jobs(jobs, &open.open_slots(), max_concurrency) {
        Some(assignments) => Ok(Schedule::from_assignments(jobs, &assignments)),
        // The sweep only keeps feasible open sets, so this is unreachable;
        // degrade to the infeasible verdict rather than panic.
        None => Ok(Schedule::infeasible()),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Timestamp-granular open set
// ─────────────────────────────────────────────────────────────────────

struct FlaggedSlots {
    candidates: Vec<u32>,
    open: Vec<bool>,
}

impl FlaggedSlots {
    fn position(&self, t: u32) -> usize {
        self.candidates.partition_point(|&c| c < t)
    }
}

impl OpenSlots for FlaggedSlots {
    fn from_candidates(candidates: &[u32]) -> Self {
        Self {
            candidates: candidates.to_vec(),
            open: vec![true; candidates.len()],
        }
    }

    fn close(&mut self, t: u32) {
        let k = self.position(t);
        self.open[k] = false;
    }

    fn reopen(&mut self, t: u32) {
        let k = self.position(t);
        self.open[k] = true;
    }

    fn open_slots(&self) -> Vec<u32> {
        self.candidates
            .iter()
            .zip(&self.open)
            .filter(|(_, &open)| open)
            .map(|(&t, _)| t)
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Interval-granular open set
// ─────────────────────────────────────────────────────────────────────

/// Sorted, pairwise non-touching batches of open slots.
struct BatchedSlots {
    batches: Vec<TimeInterval>,
}

impl OpenSlots for BatchedSlots {
    fn from_candidates(candidates: &[u32]) -> Self {
        Self {
            batches: TimeInterval::merge_timestamps(candidates.iter().copied()),
        }
    }

    fn close(&mut self, t: u32) {
        let k = self
            .batches
            .partition_point(|batch| batch.end() < t);
        // `t` is an open slot, so `batches[k]` contains it.
        let batch = self.batches[k];
        match (batch.start() == t, batch.end() == t) {
            (true, true) => {
                self.batches.remove(k);
            }
            (true, false) => {
                self.batches[k] = TimeInterval::new(t + 1, batch.end());
            }
            (false, true) => {
                self.batches[k] = TimeInterval::new(batch.start(), t - 1);
            }
            (false, false) => {
                self.batches[k] = TimeInterval::new(batch.start(), t - 1);
                self.batches
                    .insert(k + 1, TimeInterval::new(t + 1, batch.end()));
            }
        }
    }

    fn reopen(&mut self, t: u32) {
        let k = self.batches.partition_point(|batch| batch.end() + 1 < t);
        let touches_prev = k < self.batches.len() && self.batches[k].touches(&TimeInterval::new(t, t));
        let touches_next = k + 1 < self.batches.len()
            && self.batches[k + 1].touches(&TimeInterval::new(t, t));
        match (touches_prev, touches_next) {
            (true, true) => {
                let merged = TimeInterval::new(self.batches[k].start(), self.batches[k + 1].end());
                self.batches[k] = merged;
                self.batches.remove(k + 1);
            }
            (true, false) => {
                let batch = self.batches[k];
                self.batches[k] =
                    TimeInterval::new(batch.start().min(t), batch.end().max(t));
            }
            (false, _) => {
                self.batches.insert(k, TimeInterval::new(t, t));
            }
        }
    }

    fn open_slots(&self) -> Vec<u32> {
        self.batches
            .iter()
            .flat_map(|batch| batch.timestamps())
            .collect()
    }
}
