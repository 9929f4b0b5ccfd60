//! active-time-scheduling
//!
//! Algorithms for the active time scheduling problem: assign jobs with
//! release/deadline windows (or general availability sets) to discrete time
//! slots under a per-slot concurrency bound, while minimising the number of
//! slots that must be active at all, or certify that no feasible schedule
//! exists.
//!
//! The crate offers interchangeable schedulers over a common data model:
//! an exhaustive oracle, exact lazy-activation schedulers for unit jobs,
//! greedy and LP-rounding 2-approximations for general durations, a batch
//! scheduler for fixed-length pools, and matching/degree-constrained
//! subgraph schedulers for multi-interval availability at concurrency 2.

pub mod model;
pub mod schedulers;
pub mod validation;

mod flow;
mod pairing;

pub use model::{
    FixedLengthJobPool, Job, JobId, JobPool, JobPoolMI, JobScheduleEntry, PartialSchedule, Pool,
    PoolError, Schedule, TimeInterval, UnitJobPool, UnitJobPoolMI,
};
pub use schedulers::{
    BatchScheduler, BruteForceScheduler, DegreeConstrainedSubgraphScheduler,
    GreedyIntervalsScheduler, GreedyScheduler, LazyActivationSchedulerNLogN,
    LazyActivationSchedulerT, LinearProgrammingRoundedScheduler, MatchingScheduler,
    SchedulerError, UpperDegreeConstrainedSubgraphScheduler,
};
