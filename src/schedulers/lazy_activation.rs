//! Lazy-activation scheduling for unit-duration jobs.
//!
//! Exact minimisation of active slots for pools of unit jobs at any
//! concurrency bound. The algorithm follows these principles:
//!
//! 1. **Earliest deadline first**: jobs are processed by deadline, ties
//!    broken by release and then insertion order.
//! 2. **Reuse before activation**: a job is assigned to the latest already
//!    open slot in its window that still has spare capacity.
//! 3. **Displacement before activation**: when every open slot in the
//!    window is full, an alternating search tries to free capacity by
//!    cascading already placed jobs into later open slots within their own
//!    windows.
//! 4. **Lazy activation**: only when no cascade reaches spare capacity is a
//!    new slot opened: the latest closed timestamp reachable through the
//!    cascade, which is the job's deadline whenever that slot is still
//!    closed. If not even activation helps, the pool is infeasible.
//!
//! The search in step 3 is a complete augmenting-path search over the open
//! slots, so a job is declared unplaceable only when the processed prefix
//! genuinely does not fit, and a slot is opened only when the prefix does
//! not fit into the currently open set. Combined with the latest-possible
//! activation rule this yields the minimum number of active slots.
//!
//! Two schedulers share this engine and differ only in the slot-index data
//! structure behind it:
//!
//! - [`LazyActivationSchedulerT`] keeps dense per-timestamp tables, linear
//!   in the timeline horizon.
//! - [`LazyActivationSchedulerNLogN`] keeps ordered maps keyed by the open
//!   slots only.
//!
//! Identical decision logic makes their outputs identical on every input.
//!
//! On infeasible input the schedule placed so far is reported as the
//! best-effort partial payload of the infeasible result.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::model::{
    Job, JobScheduleEntry, PartialSchedule, Pool, Schedule, TimeInterval, UnitJobPool,
};

use super::SchedulerError;

/// Dense-table lazy activation scheduler (`O(n · T)`-style backend).
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyActivationSchedulerT;

impl LazyActivationSchedulerT {
    pub fn new() -> Self {
        Self
    }

    pub fn process(
        &self,
        pool: &UnitJobPool,
        max_concurrency: u32,
    ) -> Result<Schedule, SchedulerError> {
        run::<DenseSlotIndex>(pool, max_concurrency)
    }
}

/// Tree-indexed lazy activation scheduler (`O(n log n)`-style backend).
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyActivationSchedulerNLogN;

impl LazyActivationSchedulerNLogN {
    pub fn new() -> Self {
        Self
    }

    pub fn process(
        &self,
        pool: &UnitJobPool,
        max_concurrency: u32,
    ) -> Result<Schedule, SchedulerError> {
        run::<TreeSlotIndex>(pool, max_concurrency)
    }
}

/// Bookkeeping of open slots and their assigned jobs.
///
/// Both backends must answer the same queries with the same results; the
/// engine never depends on backend-specific behaviour.
trait SlotIndex {
    fn new(horizon: u32, max_concurrency: u32) -> Self;

    fn open(&mut self, t: u32);

    fn assign(&mut self, t: u32, job: usize);

    fn unassign(&mut self, t: u32, job: usize);

    /// Jobs currently assigned to `t`, in assignment order.
    fn jobs_at(&self, t: u32) -> Vec<usize>;

    /// Latest open slot in `[lo, hi]` with spare capacity.
    fn latest_spare(&self, lo: u32, hi: u32) -> Option<u32>;

    /// All open slots in `[lo, hi]`, latest first.
    fn open_desc(&self, lo: u32, hi: u32) -> Vec<u32>;

    /// Latest closed timestamp in `[lo, hi]`.
    fn latest_closed(&self, lo: u32, hi: u32) -> Option<u32>;

    /// All open slots, ascending.
    fn open_asc(&self) -> Vec<u32>;
}

// ─────────────────────────────────────────────────────────────────────
// Dense backend
// ─────────────────────────────────────────────────────────────────────

struct DenseSlotIndex {
    open: Vec<bool>,
    assigned: Vec<Vec<usize>>,
    max_concurrency: u32,
}

impl SlotIndex for DenseSlotIndex {
    fn new(horizon: u32, max_concurrency: u32) -> Self {
        let len = horizon as usize + 1;
        Self {
            open: vec![false; len],
            assigned: vec![Vec::new(); len],
            max_concurrency,
        }
    }

    fn open(&mut self, t: u32) {
        self.open[t as usize] = true;
    }

    fn assign(&mut self, t: u32, job: usize) {
        self.assigned[t as usize].push(job);
    }

    fn unassign(&mut self, t: u32, job: usize) {
        self.assigned[t as usize].retain(|&j| j != job);
    }

    fn jobs_at(&self, t: u32) -> Vec<usize> {
        self.assigned[t as usize].clone()
    }

    fn latest_spare(&self, lo: u32, hi: u32) -> Option<u32> {
        (lo..=hi).rev().find(|&t| {
            self.open[t as usize]
                && (self.assigned[t as usize].len() as u32) < self.max_concurrency
        })
    }

    fn open_desc(&self, lo: u32, hi: u32) -> Vec<u32> {
        (lo..=hi).rev().filter(|&t| self.open[t as usize]).collect()
    }

    fn latest_closed(&self, lo: u32, hi: u32) -> Option<u32> {
        (lo..=hi).rev().find(|&t| !self.open[t as usize])
    }

    fn open_asc(&self) -> Vec<u32> {
        (0..self.open.len() as u32)
            .filter(|&t| self.open[t as usize])
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tree backend
// ─────────────────────────────────────────────────────────────────────

struct TreeSlotIndex {
    /// Open slot → assigned jobs.
    slots: BTreeMap<u32, Vec<usize>>,
    /// Open slots with spare capacity.
    spare: BTreeSet<u32>,
    max_concurrency: u32,
}

impl SlotIndex for TreeSlotIndex {
    fn new(_horizon: u32, max_concurrency: u32) -> Self {
        Self {
            slots: BTreeMap::new(),
            spare: BTreeSet::new(),
            max_concurrency,
        }
    }

    fn open(&mut self, t: u32) {
        self.slots.entry(t).or_default();
        self.spare.insert(t);
    }

    fn assign(&mut self, t: u32, job: usize) {
        let assigned = self.slots.entry(t).or_default();
        assigned.push(job);
        if assigned.len() as u32 >= self.max_concurrency {
            self.spare.remove(&t);
        }
    }

    fn unassign(&mut self, t: u32, job: usize) {
        if let Some(assigned) = self.slots.get_mut(&t) {
            assigned.retain(|&j| j != job);
            self.spare.insert(t);
        }
    }

    fn jobs_at(&self, t: u32) -> Vec<usize> {
        self.slots.get(&t).cloned().unwrap_or_default()
    }

    fn latest_spare(&self, lo: u32, hi: u32) -> Option<u32> {
        self.spare.range(lo..=hi).next_back().copied()
    }

    fn open_desc(&self, lo: u32, hi: u32) -> Vec<u32> {
        self.slots.range(lo..=hi).rev().map(|(&t, _)| t).collect()
    }

    fn latest_closed(&self, lo: u32, hi: u32) -> Option<u32> {
        // Walk down from `hi` through the run of consecutively open slots.
        let mut candidate = hi;
        for (&t, _) in self.slots.range(lo..=hi).rev() {
            if t == candidate {
                if candidate == lo {
                    return None;
                }
                candidate -= 1;
            } else {
                break;
            }
        }
        (!self.slots.contains_key(&candidate)).then_some(candidate)
    }

    fn open_asc(&self) -> Vec<u32> {
        self.slots.keys().copied().collect()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────

/// How a slot became a capacity candidate during the displacement search.
enum Origin {
    /// The job being placed wants this slot directly.
    Root,
    /// `job`, currently at `from`, can move here to free `from`.
    Moved { job: usize, from: u32 },
}

fn run<S: SlotIndex>(pool: &UnitJobPool, max_concurrency: u32) -> Result<Schedule, SchedulerError> {
    if max_concurrency == 0 {
        return Err(SchedulerError::InvalidConcurrency);
    }
    let jobs = pool.jobs();
    let horizon = jobs.iter().filter_map(Job::deadline).max().unwrap_or(0);

    let mut order: Vec<usize> = (0..jobs.len()).collect();
    order.sort_by_key(|&i| {
        (
            jobs[i].deadline().unwrap_or(0),
            jobs[i].release().unwrap_or(0),
            i,
        )
    });

    let mut index = S::new(horizon, max_concurrency);
    let mut assigned_slot: Vec<Option<u32>> = vec![None; jobs.len()];

    for &i in &order {
        let Some((release, deadline)) = jobs[i].release().zip(jobs[i].deadline()) else {
            // No availability at all: nothing can place this job.
            return Ok(partial_result(jobs, &assigned_slot, &index));
        };
        if let Some(t) = index.latest_spare(release, deadline) {
            index.assign(t, i);
            assigned_slot[i] = Some(t);
        } else if !place_with_displacement(
            &mut index,
            &mut assigned_slot,
            jobs,
            i,
            release,
            deadline,
        ) {
            return Ok(partial_result(jobs, &assigned_slot, &index));
        }
    }

    let assignments: Vec<Vec<u32>> = assigned_slot
        .iter()
        .map(|slot| slot.iter().copied().collect())
        .collect();
    Ok(Schedule::from_assignments(jobs, &assignments))
}

/// Alternating search for capacity when every open slot in the window of
/// `root` is full.
///
/// Explores the slots reachable by cascading placed jobs into later open
/// slots of their own windows. A reachable spare slot resolves the cascade
/// without activating anything; failing that, the latest reachable closed
/// timestamp is activated. Returns false when neither exists, i.e. the
/// processed jobs genuinely exceed the timeline's capacity.
fn place_with_displacement<S: SlotIndex>(
    index: &mut S,
    assigned_slot: &mut [Option<u32>],
    jobs: &[Job],
    root: usize,
    release: u32,
    deadline: u32,
) -> bool {
    let mut parent: HashMap<u32, Origin> = HashMap::new();
    let mut queue: VecDeque<u32> = VecDeque::new();

    for t in index.open_desc(release, deadline) {
        parent.insert(t, Origin::Root);
        queue.push_back(t);
    }
    let mut best_closed: Option<u32> = index.latest_closed(release, deadline);
    if let Some(c) = best_closed {
        parent.insert(c, Origin::Root);
    }

    while let Some(t) = queue.pop_front() {
        for job in index.jobs_at(t) {
            let Some((lo, hi)) = jobs[job].release().zip(jobs[job].deadline()) else {
                continue;
            };
            if let Some(spare) = index.latest_spare(lo, hi) {
                parent.insert(spare, Origin::Moved { job, from: t });
                apply_cascade(index, assigned_slot, &parent, root, spare);
                return true;
            }
            if let Some(closed) = index.latest_closed(lo, hi) {
                if best_closed.map_or(true, |best| closed > best) {
                    best_closed = Some(closed);
                    parent.insert(closed, Origin::Moved { job, from: t });
                }
            }
            for next in index.open_desc(lo, hi) {
                if let std::collections::hash_map::Entry::Vacant(entry) = parent.entry(next) {
                    entry.insert(Origin::Moved { job, from: t });
                    queue.push_back(next);
                }
            }
        }
    }

    if let Some(closed) = best_closed {
        index.open(closed);
        apply_cascade(index, assigned_slot, &parent, root, closed);
        return true;
    }
    false
}

/// Applies the chain of moves recorded by the search, ending with the root
/// job placed at the first slot of the chain.
fn apply_cascade<S: SlotIndex>(
    index: &mut S,
    assigned_slot: &mut [Option<u32>],
    parent: &HashMap<u32, Origin>,
    root: usize,
    terminal: u32,
) {
    let mut cur = terminal;
    loop {
        match &parent[&cur] {
            Origin::Root => {
                index.assign(cur, root);
                assigned_slot[root] = Some(cur);
                return;
            }
            Origin::Moved { job, from } => {
                index.unassign(*from, *job);
                index.assign(cur, *job);
                assigned_slot[*job] = Some(cur);
                cur = *from;
            }
        }
    }
}

fn partial_result<S: SlotIndex>(
    jobs: &[Job],
    assigned_slot: &[Option<u32>],
    index: &S,
) -> Schedule {
    let mut job_schedules = Vec::new();
    for (i, slot) in assigned_slot.iter().enumerate() {
        if let Some(t) = slot {
            job_schedules.push(JobScheduleEntry {
                job: jobs[i].clone(),
                execution_intervals: vec![TimeInterval::new(*t, *t)],
            });
        }
    }
    Schedule::Infeasible {
        partial: Some(PartialSchedule {
            active_time_intervals: TimeInterval::merge_timestamps(index.open_asc()),
            job_schedules,
        }),
    }
}
