//! Schedule validation and cross-scheduler comparison.
//!
//! `check_schedule` verifies every invariant a feasible schedule must
//! satisfy; `check_equality` / `check_2_approximation` compare two
//! schedulers' outputs the way the cross-validation tests do: identical
//! feasibility verdicts and total active time equal (resp. within a factor
//! of two).

use std::collections::HashMap;

use thiserror::Error;

use crate::model::{JobId, Pool, Schedule, TimeInterval};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("intervals {prev} and {next} are out of order, overlapping, or touching")]
    MalformedIntervalSequence {
        prev: TimeInterval,
        next: TimeInterval,
    },

    #[error("job {job} executes at {t}, which is not covered by any active interval")]
    ExecutionOutsideActiveTime { job: JobId, t: u32 },

    #[error("job {job} executes at {t}, outside its availability")]
    ExecutionOutsideAvailability { job: JobId, t: u32 },

    #[error("{count} jobs execute at {t}, exceeding the concurrency bound {max_concurrency}")]
    ConcurrencyExceeded {
        t: u32,
        count: u64,
        max_concurrency: u32,
    },

    #[error("job {job} is scheduled for {scheduled} slots but has duration {duration}")]
    DurationMismatch {
        job: JobId,
        scheduled: u64,
        duration: u32,
    },

    #[error("schedule reports {actual} job entries for a pool of {expected}")]
    WrongEntryCount { expected: usize, actual: usize },

    #[error("job {job} does not appear exactly once in the schedule")]
    JobEntryMismatch { job: JobId },

    #[error("schedules disagree on feasibility")]
    FeasibilityDisagreement,

    #[error("total active times {a} and {b} are not within a factor of {factor}")]
    ApproximationExceeded { a: u64, b: u64, factor: u64 },
}

/// Checks that an interval sequence is ordered with a gap of at least one
/// slot between consecutive intervals.
fn check_interval_sequence(intervals: &[TimeInterval]) -> Result<(), ValidationError> {
    for pair in intervals.windows(2) {
        if pair[0].end() + 1 >= pair[1].start() {
            return Err(ValidationError::MalformedIntervalSequence {
                prev: pair[0],
                next: pair[1],
            });
        }
    }
    Ok(())
}

/// Verifies every feasible-schedule invariant against the pool it was
/// produced from. Infeasible schedules pass vacuously.
pub fn check_schedule(
    schedule: &Schedule,
    pool: &impl Pool,
    max_concurrency: u32,
) -> Result<(), ValidationError> {
    let (active, entries) = match (schedule.active_time_intervals(), schedule.job_schedules()) {
        (Some(active), Some(entries)) => (active, entries),
        _ => return Ok(()),
    };

    check_interval_sequence(active)?;

    if entries.len() != pool.size() {
        return Err(ValidationError::WrongEntryCount {
            expected: pool.size(),
            actual: entries.len(),
        });
    }

    let mut seen: Vec<bool> = vec![false; pool.size()];
    let mut concurrency: HashMap<u32, u64> = HashMap::new();

    for entry in entries {
        let id = entry.job.id();
        if id.0 >= pool.size() || seen[id.0] || pool.jobs()[id.0] != entry.job {
            return Err(ValidationError::JobEntryMismatch { job: id });
        }
        seen[id.0] = true;

        check_interval_sequence(&entry.execution_intervals)?;

        let scheduled: u64 = entry.execution_intervals.iter().map(|iv| iv.duration()).sum();
        if scheduled != u64::from(entry.job.duration()) {
            return Err(ValidationError::DurationMismatch {
                job: id,
                scheduled,
                duration: entry.job.duration(),
            });
        }

        for interval in &entry.execution_intervals {
            for t in interval.timestamps() {
                if !entry.job.is_available_at(t) {
                    return Err(ValidationError::ExecutionOutsideAvailability { job: id, t });
                }
                if !active.iter().any(|iv| iv.contains(t)) {
                    return Err(ValidationError::ExecutionOutsideActiveTime { job: id, t });
                }
                *concurrency.entry(t).or_insert(0) += 1;
            }
        }
    }

    for (&t, &count) in &concurrency {
        if count > u64::from(max_concurrency) {
            return Err(ValidationError::ConcurrencyExceeded {
                t,
                count,
                max_concurrency,
            });
        }
    }

    Ok(())
}

fn check_approximation(
    a: &Schedule,
    b: &Schedule,
    pool: &impl Pool,
    max_concurrency: u32,
    factor: u64,
) -> Result<(), ValidationError> {
    if a.all_jobs_scheduled() != b.all_jobs_scheduled() {
        return Err(ValidationError::FeasibilityDisagreement);
    }
    let (Some(active_a), Some(active_b)) = (a.total_active_time(), b.total_active_time()) else {
        return Ok(());
    };
    check_schedule(a, pool, max_concurrency)?;
    check_schedule(b, pool, max_concurrency)?;

    if active_a > factor * active_b || active_b > factor * active_a {
        return Err(ValidationError::ApproximationExceeded {
            a: active_a,
            b: active_b,
            factor,
        });
    }
    Ok(())
}

/// Both schedules feasible (or both infeasible) with equal total active
/// time.
pub fn check_equality(
    a: &Schedule,
    b: &Schedule,
    pool: &impl Pool,
    max_concurrency: u32,
) -> Result<(), ValidationError> {
    check_approximation(a, b, pool, max_concurrency, 1)
}

/// Both schedules feasible (or both infeasible) with total active times
/// within a factor of two of each other.
pub fn check_2_approximation(
    a: &Schedule,
    b: &Schedule,
    pool: &impl Pool,
    max_concurrency: u32,
) -> Result<(), ValidationError> {
    check_approximation(a, b, pool, max_concurrency, 2)
}
