//! Assignment of job units to open slots, as a max-flow b-matching.
//!
//! Every feasibility question the schedulers ask reduces to the same
//! bipartite degree-constrained subgraph problem: each job needs
//! `duration` distinct slots from its availability, each slot carries at
//! most `max_concurrency` jobs. The flow network is
//! `source → job (duration) → slot (1) → sink (max_concurrency)`; the pool
//! is feasible on a slot set exactly when the max flow saturates every
//! source edge.
//!
//! Adjacency is built in pool order with slots ascending, so the blocking
//! flow and therefore the returned assignment are deterministic.

use crate::model::Job;

/// Dinic residual network. Edges are stored in pairs: edge `2k` is the
/// forward edge, `2k + 1` its reverse.
struct FlowNetwork {
    adjacency: Vec<Vec<usize>>,
    to: Vec<usize>,
    cap: Vec<u64>,
}

impl FlowNetwork {
    fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            to: Vec::new(),
            cap: Vec::new(),
        }
    }

    /// Adds a forward edge and its zero-capacity reverse; returns the
    /// forward edge index.
    fn add_edge(&mut self, from: usize, to: usize, cap: u64) -> usize {
        let index = self.to.len();
        self.adjacency[from].push(index);
        self.to.push(to);
        self.cap.push(cap);
        self.adjacency[to].push(index + 1);
        self.to.push(from);
        self.cap.push(0);
        index
    }

    /// Flow pushed through forward edge `index`.
    fn flow(&self, index: usize) -> u64 {
        self.cap[index ^ 1]
    }

    fn levels(&self, source: usize, sink: usize) -> Option<Vec<u32>> {
        let mut level = vec![u32::MAX; self.adjacency.len()];
        level[source] = 0;
        let mut queue = std::collections::VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            for &e in &self.adjacency[v] {
                let w = self.to[e];
                if self.cap[e] > 0 && level[w] == u32::MAX {
                    level[w] = level[v] + 1;
                    queue.push_back(w);
                }
            }
        }
        (level[sink] != u32::MAX).then_some(level)
    }

    fn augment(
        &mut self,
        v: usize,
        sink: usize,
        limit: u64,
        level: &[u32],
        iter: &mut [usize],
    ) -> u64 {
        if v == sink {
            return limit;
        }
        while iter[v] < self.adjacency[v].len() {
            let e = self.adjacency[v][iter[v]];
            let w = self.to[e];
            if self.cap[e] > 0 && level[w] == level[v] + 1 {
                let pushed = self.augment(w, sink, limit.min(self.cap[e]), level, iter);
                if pushed > 0 {
                    self.cap[e] -= pushed;
                    self.cap[e ^ 1] += pushed;
                    return pushed;
                }
            }
            iter[v] += 1;
        }
        0
    }

    fn max_flow(&mut self, source: usize, sink: usize) -> u64 {
        let mut total = 0;
        while let Some(level) = self.levels(source, sink) {
            let mut iter = vec![0; self.adjacency.len()];
            loop {
                let pushed = self.augment(source, sink, u64::MAX, &level, &mut iter);
                if pushed == 0 {
                    break;
                }
                total += pushed;
            }
        }
        total
    }
}

/// Assigns every job its `duration` slots from `open_slots`, respecting the
/// per-slot concurrency bound.
///
/// `open_slots` must be sorted ascending and duplicate-free. Returns the
/// sorted slot list per job, or `None` when no complete assignment exists.
pub(crate) fn assign_jobs(
    jobs: &[Job],
    open_slots: &[u32],
    max_concurrency: u32,
) -> Option<Vec<Vec<u32>>> {
    debug_assert!(open_slots.windows(2).all(|w| w[0] < w[1]));

    let n = jobs.len();
    let m = open_slots.len();
    let source = 0;
    let sink = 1;
    let job_node = |i: usize| 2 + i;
    let slot_node = |k: usize| 2 + n + k;

    let mut network = FlowNetwork::new(2 + n + m);
    let mut demand_total: u64 = 0;
    // job_edges[i] lists (slot index, forward edge index) for job i.
    let mut job_edges: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];

    for (i, job) in jobs.iter().enumerate() {
        let duration = u64::from(job.duration());
        if duration == 0 {
            continue;
        }
        demand_total += duration;
        network.add_edge(source, job_node(i), duration);
        for (k, &t) in open_slots.iter().enumerate() {
            if job.is_available_at(t) {
                let e = network.add_edge(job_node(i), slot_node(k), 1);
                job_edges[i].push((k, e));
            }
        }
    }
    for k in 0..m {
        network.add_edge(slot_node(k), sink, u64::from(max_concurrency));
    }

    if network.max_flow(source, sink) != demand_total {
        return None;
    }

    let mut assignments = vec![Vec::new(); n];
    for (i, edges) in job_edges.iter().enumerate() {
        for &(k, e) in edges {
            if network.flow(e) > 0 {
                assignments[i].push(open_slots[k]);
            }
        }
    }
    Some(assignments)
}

/// Feasibility probe: can every job be fully placed within `open_slots`?
pub(crate) fn is_feasible(jobs: &[Job], open_slots: &[u32], max_concurrency: u32) -> bool {
    assign_jobs(jobs, open_slots, max_concurrency).is_some()
}
