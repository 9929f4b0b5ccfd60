//! Exhaustive reference scheduler.
//!
//! Enumerates candidate active-slot subsets in increasing size order and
//! returns the first one that admits a complete assignment, which is
//! therefore an optimum. Exponential in the number of candidate slots;
//! intended as the test oracle the other schedulers are validated against,
//! not for production use.

use crate::flow;
use crate::model::{Pool, Schedule};

use super::SchedulerError;

/// Exact scheduler for any pool variant, by subset enumeration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceScheduler;

impl BruteForceScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Finds a schedule with the minimum number of active slots, or proves
    /// infeasibility.
    ///
    /// When several optima exist, the lexicographically first subset in the
    /// enumeration order is returned, making the result deterministic.
    pub fn process(
        &self,
        pool: &impl Pool,
        max_concurrency: u32,
    ) -> Result<Schedule, SchedulerError> {
        if max_concurrency == 0 {
            return Err(SchedulerError::InvalidConcurrency);
        }
        let jobs = pool.jobs();

        // Candidate slots: anything a positive-duration job could run at.
        let mut candidates: Vec<u32> = jobs
            .iter()
            .filter(|job| job.duration() > 0)
            .flat_map(|job| job.available_timestamps())
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        for size in 0..=candidates.len() {
            let mut indices: Vec<usize> = (0..size).collect();
            loop {
                let subset: Vec<u32> = indices.iter().map(|&i| candidates[i]).collect();
                if let Some(assignments) = flow::assign_jobs(jobs, &subset, max_concurrency) {
                    return Ok(Schedule::from_assignments(jobs, &assignments));
                }
                if !next_combination(&mut indices, candidates.len()) {
                    break;
                }
            }
        }
        Ok(Schedule::infeasible())
    }
}

/// Advances `indices` to the next k-combination of `0..n` in lexicographic
/// order. Returns false when the last combination has been consumed.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    for i in (0..k).rev() {
        if indices[i] < n - (k - i) {
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
