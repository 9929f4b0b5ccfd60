//! Matching-based scheduler for unit jobs with multi-interval availability.
//!
//! Fixed concurrency 2. Each candidate timestamp becomes a two-node gadget
//! with an internal "closed" edge; each job connects to both nodes of every
//! timestamp it may run at. In a matching, a slot either carries up to two
//! jobs or matches internally and stays closed, so a maximum matching that
//! saturates every job realises a feasible schedule with the maximum number
//! of closed slots, i.e. the minimum number of active slots.
//!
//! A maximum-cardinality matching alone may trade a job for a closed slot
//! (both count one edge), so the result of
//! [`maximum_matching`](petgraph::algo::matching::maximum_matching) is
//! repaired against a flow-derived job-saturating assignment; the repair
//! keeps the cardinality, making the decoded schedule both feasible and
//! optimal.

use petgraph::graph::{NodeIndex, UnGraph};

use crate::flow;
use crate::model::{Pool, Schedule, UnitJobPoolMI};
use crate::pairing::{resaturate, MateMap};

use super::SchedulerError;

/// Exact scheduler for [`UnitJobPoolMI`] at concurrency 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingScheduler;

const MAX_CONCURRENCY: u32 = 2;

impl MatchingScheduler {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, pool: &UnitJobPoolMI) -> Result<Schedule, SchedulerError> {
        let jobs = pool.jobs();
        let n = jobs.len();

        let mut slots: Vec<u32> = jobs
            .iter()
            .flat_map(|job| job.available_timestamps())
            .collect();
        slots.sort_unstable();
        slots.dedup();

        let Some(base_assignment) = flow::assign_jobs(jobs, &slots, MAX_CONCURRENCY) else {
            return Ok(Schedule::infeasible());
        };

        // Job node i, then slot gadget nodes (n + 2k, n + 2k + 1).
        let mut graph: UnGraph<(), ()> = UnGraph::new_undirected();
        for _ in 0..n {
            graph.add_node(());
        }
        let slot_nodes: Vec<(NodeIndex, NodeIndex)> = (0..slots.len())
            .map(|_| {
                let first = graph.add_node(());
                let second = graph.add_node(());
                graph.add_edge(first, second, ());
                (first, second)
            })
            .collect();
        for (i, job) in jobs.iter().enumerate() {
            for t in job.available_timestamps() {
                let k = slots.partition_point(|&s| s < t);
                graph.add_edge(NodeIndex::new(i), slot_nodes[k].0, ());
                graph.add_edge(NodeIndex::new(i), slot_nodes[k].1, ());
            }
        }

        // Saturating matching from the flow assignment: jobs occupy slot
        // nodes, untouched slots match internally.
        let mut base = MateMap::new(graph.node_count());
        let mut slot_load = vec![0usize; slots.len()];
        for (i, assigned) in base_assignment.iter().enumerate() {
            for &t in assigned {
                let k = slots.partition_point(|&s| s < t);
                let node = if slot_load[k] == 0 {
                    slot_nodes[k].0
                } else {
                    slot_nodes[k].1
                };
                base.pair(NodeIndex::new(i), node);
                slot_load[k] += 1;
            }
        }
        for (k, &load) in slot_load.iter().enumerate() {
            if load == 0 {
                base.pair(slot_nodes[k].0, slot_nodes[k].1);
            }
        }

        let mut star = MateMap::from_maximum_matching(&graph);
        resaturate(&mut star, &base, (0..n).map(NodeIndex::new));

        // Every job's mate is a slot-gadget node; fall back to the flow
        // assignment if the repair ever left one uncovered.
        let mut assignments: Vec<Vec<u32>> = Vec::with_capacity(n);
        for i in 0..n {
            match star.mate(NodeIndex::new(i)) {
                Some(node) => {
                    let k = (node.index() - n) / 2;
                    assignments.push(vec![slots[k]]);
                }
                None => return Ok(Schedule::from_assignments(jobs, &base_assignment)),
            }
        }
        Ok(Schedule::from_assignments(jobs, &assignments))
    }
}
