//! Degree-constrained-subgraph schedulers for multi-interval pools.
//!
//! Both run at fixed concurrency 2 and view the pool as a bipartite
//! degree-constrained subgraph problem: pick job–timestamp edges so every
//! job has degree equal to its duration and every timestamp degree at most
//! two.
//!
//! [`DegreeConstrainedSubgraphScheduler`] solves the selection as a
//! max-flow b-matching and reports the canonical assignment it yields; its
//! active slots are whatever that assignment touches.
//!
//! [`UpperDegreeConstrainedSubgraphScheduler`] additionally minimises the
//! number of touched timestamps. The b-matching is lifted to an ordinary
//! matching: each job becomes one copy node per duration unit, each
//! candidate job–timestamp edge is split into a two-node gadget (so a job
//! cannot occupy the same timestamp twice), and each timestamp keeps the
//! two-node close-edge gadget of the matching scheduler. A maximum
//! matching repaired to saturate every job copy then closes the maximum
//! number of timestamps; half-selected edge gadgets left behind by
//! cardinality ties are flipped out one by one, each flip re-saturating its
//! displaced copy along the flow-derived base matching.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::flow;
use crate::model::{Job, JobPoolMI, Pool, Schedule};
use crate::pairing::{resaturate, MateMap};

use super::SchedulerError;

const MAX_CONCURRENCY: u32 = 2;

/// Feasibility-oriented b-matching scheduler for [`JobPoolMI`] at
/// concurrency 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeConstrainedSubgraphScheduler;

impl DegreeConstrainedSubgraphScheduler {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, pool: &JobPoolMI) -> Result<Schedule, SchedulerError> {
        let jobs = pool.jobs();
        let slots = candidate_slots(jobs);
        match flow::assign_jobs(jobs, &slots, MAX_CONCURRENCY) {
            Some(assignments) => Ok(Schedule::from_assignments(jobs, &assignments)),
            None => Ok(Schedule::infeasible()),
        }
    }
}

/// Active-slot-minimising b-matching scheduler for [`JobPoolMI`] at
/// concurrency 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperDegreeConstrainedSubgraphScheduler;

/// One split job–timestamp edge: `e_job` faces the job copies, `e_slot`
/// faces the timestamp gadget.
struct SplitEdge {
    job: usize,
    slot: usize,
    e_job: NodeIndex,
    e_slot: NodeIndex,
}

impl UpperDegreeConstrainedSubgraphScheduler {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, pool: &JobPoolMI) -> Result<Schedule, SchedulerError> {
        let jobs = pool.jobs();
        let slots = candidate_slots(jobs);
        let Some(base_assignment) = flow::assign_jobs(jobs, &slots, MAX_CONCURRENCY) else {
            return Ok(Schedule::infeasible());
        };

        // ── Gadget graph ──────────────────────────────────────────────
        let mut graph: UnGraph<(), ()> = UnGraph::new_undirected();

        let mut copy_offset: Vec<usize> = Vec::with_capacity(jobs.len());
        let mut copies: Vec<NodeIndex> = Vec::new();
        for job in jobs {
            copy_offset.push(copies.len());
            for _ in 0..job.duration() {
                copies.push(graph.add_node(()));
            }
        }
        let copy_count = copies.len();

        let mut split_edges: Vec<SplitEdge> = Vec::new();
        let mut edge_lookup: HashMap<(usize, usize), usize> = HashMap::new();
        for (i, job) in jobs.iter().enumerate() {
            if job.duration() == 0 {
                continue;
            }
            for t in job.available_timestamps() {
                let k = slots.partition_point(|&s| s < t);
                let e_job = graph.add_node(());
                let e_slot = graph.add_node(());
                graph.add_edge(e_job, e_slot, ());
                edge_lookup.insert((i, k), split_edges.len());
                split_edges.push(SplitEdge {
                    job: i,
                    slot: k,
                    e_job,
                    e_slot,
                });
            }
        }
        let slot_nodes: Vec<(NodeIndex, NodeIndex)> = (0..slots.len())
            .map(|_| {
                let first = graph.add_node(());
                let second = graph.add_node(());
                graph.add_edge(first, second, ());
                (first, second)
            })
            .collect();
        for split in &split_edges {
            for c in 0..jobs[split.job].duration() as usize {
                graph.add_edge(copies[copy_offset[split.job] + c], split.e_job, ());
            }
            graph.add_edge(split.e_slot, slot_nodes[split.slot].0, ());
            graph.add_edge(split.e_slot, slot_nodes[split.slot].1, ());
        }

        // ── Saturating base matching from the flow assignment ─────────
        let mut base = MateMap::new(graph.node_count());
        let mut slot_use = vec![0usize; slots.len()];
        for (i, assigned) in base_assignment.iter().enumerate() {
            for (c, &t) in assigned.iter().enumerate() {
                let k = slots.partition_point(|&s| s < t);
                let Some(&q) = edge_lookup.get(&(i, k)) else {
                    continue;
                };
                base.pair(copies[copy_offset[i] + c], split_edges[q].e_job);
                let slot_node = if slot_use[k] == 0 {
                    slot_nodes[k].0
                } else {
                    slot_nodes[k].1
                };
                base.pair(split_edges[q].e_slot, slot_node);
                slot_use[k] += 1;
            }
        }
        for split in &split_edges {
            if base.mate(split.e_job).is_none() {
                base.pair(split.e_job, split.e_slot);
            }
        }
        for (k, &used) in slot_use.iter().enumerate() {
            if used == 0 {
                base.pair(slot_nodes[k].0, slot_nodes[k].1);
            }
        }

        // ── Maximum matching, saturation repair, gadget cleanup ───────
        let mut star = MateMap::from_maximum_matching(&graph);
        resaturate(&mut star, &base, copies.iter().copied());

        // A cardinality tie can leave a split edge half-selected: job side
        // matched to a copy, slot side dangling. Flip it to internal and
        // re-seat the displaced copy; every flip removes one half-selection
        // for good, so the scan settles.
        let mut passes = 0;
        loop {
            let mut changed = false;
            for split in &split_edges {
                let Some(mate) = star.mate(split.e_job) else {
                    continue;
                };
                if mate.index() < copy_count && star.mate(split.e_slot).is_none() {
                    star.clear(mate);
                    star.pair(split.e_job, split.e_slot);
                    resaturate(&mut star, &base, [mate]);
                    changed = true;
                }
            }
            passes += 1;
            if !changed || passes > copy_count + 1 {
                break;
            }
        }

        // ── Decode ────────────────────────────────────────────────────
        let e_job_edge: HashMap<NodeIndex, usize> = split_edges
            .iter()
            .enumerate()
            .map(|(q, split)| (split.e_job, q))
            .collect();

        let mut assignments: Vec<Vec<u32>> = vec![Vec::new(); jobs.len()];
        let mut intact = true;
        for &copy in &copies {
            let selected = star
                .mate(copy)
                .and_then(|e_job| e_job_edge.get(&e_job))
                .filter(|&&q| {
                    let split = &split_edges[q];
                    star.mate(split.e_slot)
                        .map_or(false, |mate| mate != split.e_job)
                });
            match selected {
                Some(&q) => assignments[split_edges[q].job].push(slots[split_edges[q].slot]),
                None => intact = false,
            }
        }
        if intact {
            for (i, job) in jobs.iter().enumerate() {
                assignments[i].sort_unstable();
                if assignments[i].len() as u64 != u64::from(job.duration()) {
                    intact = false;
                }
            }
        }
        if !intact {
            // The gadget bookkeeping failed a sanity check; the flow
            // assignment is still a correct (if not slot-minimal) schedule.
            return Ok(Schedule::from_assignments(jobs, &base_assignment));
        }
        Ok(Schedule::from_assignments(jobs, &assignments))
    }
}

fn candidate_slots(jobs: &[Job]) -> Vec<u32> {
    let mut slots: Vec<u32> = jobs
        .iter()
        .filter(|job| job.duration() > 0)
        .flat_map(|job| job.available_timestamps())
        .collect();
    slots.sort_unstable();
    slots.dedup();
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimeInterval;
    use crate::validation::check_schedule;

    fn four_shared_jobs() -> JobPoolMI {
        let mut pool = JobPoolMI::new();
        for _ in 0..4 {
            pool.add_job(&[(1, 2), (4, 5)], 2).unwrap();
        }
        pool
    }

    #[test]
    fn dcs_fills_saturated_instance() {
        let pool = four_shared_jobs();
        let schedule = DegreeConstrainedSubgraphScheduler::new()
            .process(&pool)
            .unwrap();
        assert!(schedule.all_jobs_scheduled());
        assert_eq!(
            schedule.active_time_intervals().unwrap(),
            &[TimeInterval::new(1, 2), TimeInterval::new(4, 5)][..]
        );
        assert_eq!(schedule.job_schedules().unwrap().len(), 4);
        check_schedule(&schedule, &pool, 2).unwrap();
    }

    #[test]
    fn dcs_detects_overloaded_slots() {
        let mut pool = JobPoolMI::new();
        for _ in 0..3 {
            pool.add_job(&[(1, 2)], 2).unwrap();
        }
        let schedule = DegreeConstrainedSubgraphScheduler::new()
            .process(&pool)
            .unwrap();
        assert!(!schedule.all_jobs_scheduled());
        assert!(schedule.partial().is_none());
    }

    #[test]
    fn dcs_zero_duration_jobs() {
        let mut pool = JobPoolMI::new();
        pool.add_job(&[(1, 2)], 0).unwrap();
        pool.add_job(&[(4, 5)], 0).unwrap();
        let schedule = DegreeConstrainedSubgraphScheduler::new()
            .process(&pool)
            .unwrap();
        assert!(schedule.all_jobs_scheduled());
        assert_eq!(schedule.total_active_time(), Some(0));
        assert_eq!(schedule.job_schedules().unwrap().len(), 2);
    }

    #[test]
    fn udcs_matches_dcs_on_saturated_instance() {
        let pool = four_shared_jobs();
        let schedule = UpperDegreeConstrainedSubgraphScheduler::new()
            .process(&pool)
            .unwrap();
        assert!(schedule.all_jobs_scheduled());
        assert_eq!(schedule.total_active_time(), Some(4));
        check_schedule(&schedule, &pool, 2).unwrap();
    }

    #[test]
    fn udcs_closes_unneeded_slots() {
        // One job of duration 2 over four slots: exactly two stay active.
        let mut pool = JobPoolMI::new();
        pool.add_job(&[(1, 4)], 2).unwrap();
        let schedule = UpperDegreeConstrainedSubgraphScheduler::new()
            .process(&pool)
            .unwrap();
        assert_eq!(schedule.total_active_time(), Some(2));
        check_schedule(&schedule, &pool, 2).unwrap();
    }

    #[test]
    fn udcs_packs_two_jobs_pairwise() {
        // Two duration-2 jobs over a shared window: two slots, both full.
        let mut pool = JobPoolMI::new();
        pool.add_job(&[(1, 4)], 2).unwrap();
        pool.add_job(&[(1, 4)], 2).unwrap();
        let schedule = UpperDegreeConstrainedSubgraphScheduler::new()
            .process(&pool)
            .unwrap();
        assert_eq!(schedule.total_active_time(), Some(2));
        check_schedule(&schedule, &pool, 2).unwrap();
    }

    #[test]
    fn udcs_respects_rigid_jobs() {
        // A rigid job pins slots 2 and 3; the flexible job must share them.
        let mut pool = JobPoolMI::new();
        pool.add_job(&[(2, 3)], 2).unwrap();
        pool.add_job(&[(1, 4)], 2).unwrap();
        let schedule = UpperDegreeConstrainedSubgraphScheduler::new()
            .process(&pool)
            .unwrap();
        assert_eq!(schedule.total_active_time(), Some(2));
        check_schedule(&schedule, &pool, 2).unwrap();
    }

    #[test]
    fn udcs_infeasible_instance() {
        let mut pool = JobPoolMI::new();
        for _ in 0..3 {
            pool.add_job(&[(1, 2)], 2).unwrap();
        }
        let schedule = UpperDegreeConstrainedSubgraphScheduler::new()
            .process(&pool)
            .unwrap();
        assert!(!schedule.all_jobs_scheduled());
    }
}
