//! Maximum-matching support for the matching-based schedulers.
//!
//! `petgraph`'s maximum matching maximises cardinality only; the schedulers
//! additionally need every job-side vertex saturated whenever the instance
//! is feasible. [`resaturate`] rebalances a maximum matching against a
//! known saturating matching by flipping the alternating path between them,
//! which preserves cardinality (the matchings only trade which vertices go
//! unmatched, and only vertices unmatched in the saturating matching can
//! end up unmatched).

use petgraph::algo::matching::maximum_matching;
use petgraph::graph::{NodeIndex, UnGraph};

/// Symmetric partner table for a matching over graph node indices.
#[derive(Debug, Clone)]
pub(crate) struct MateMap {
    mates: Vec<Option<NodeIndex>>,
}

impl MateMap {
    pub(crate) fn new(nodes: usize) -> Self {
        Self {
            mates: vec![None; nodes],
        }
    }

    /// Extracts the partner table of a maximum-cardinality matching.
    pub(crate) fn from_maximum_matching<N, E>(graph: &UnGraph<N, E>) -> Self {
        let matching = maximum_matching(graph);
        let mut mates = Self::new(graph.node_count());
        for node in graph.node_indices() {
            mates.mates[node.index()] = matching.mate(node);
        }
        mates
    }

    pub(crate) fn mate(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.mates[node.index()]
    }

    pub(crate) fn pair(&mut self, a: NodeIndex, b: NodeIndex) {
        self.mates[a.index()] = Some(b);
        self.mates[b.index()] = Some(a);
    }

    pub(crate) fn clear(&mut self, node: NodeIndex) {
        self.mates[node.index()] = None;
    }
}

/// Re-saturates `targets` in `star` using the alternating structure against
/// `base`, a matching that covers every target.
///
/// `star` must be maximum; each walk then trades one unmatched target for
/// one vertex `base` leaves unmatched, keeping the cardinality intact.
pub(crate) fn resaturate(
    star: &mut MateMap,
    base: &MateMap,
    targets: impl IntoIterator<Item = NodeIndex>,
) {
    for target in targets {
        if star.mate(target).is_some() {
            continue;
        }
        let mut unmatched = target;
        loop {
            let Some(partner) = base.mate(unmatched) else {
                break;
            };
            let displaced = star.mate(partner);
            star.pair(unmatched, partner);
            match displaced {
                Some(next) if next != unmatched => {
                    star.clear(next);
                    unmatched = next;
                }
                _ => break,
            }
        }
    }
}
