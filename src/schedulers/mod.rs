//! The scheduling algorithms.
//!
//! Every scheduler is a stateless unit struct with a
//! `process(&pool, …) -> Result<Schedule, SchedulerError>` method; the
//! schedulers fixed at concurrency 2 (matching and degree-constrained
//! families) take only the pool. Instances are freely reusable across
//! calls and never mutate the pool; given identical pool contents the
//! output is identical across runs.

mod batch;
mod brute_force;
mod degree_constrained;
mod error;
mod greedy;
mod lazy_activation;
mod linear_programming;
mod matching;

pub use batch::BatchScheduler;
pub use brute_force::BruteForceScheduler;
pub use degree_constrained::{
    DegreeConstrainedSubgraphScheduler, UpperDegreeConstrainedSubgraphScheduler,
};
pub use error::SchedulerError;
pub use greedy::{GreedyIntervalsScheduler, GreedyScheduler};
pub use lazy_activation::{LazyActivationSchedulerNLogN, LazyActivationSchedulerT};
pub use linear_programming::LinearProgrammingRoundedScheduler;
pub use matching::MatchingScheduler;
