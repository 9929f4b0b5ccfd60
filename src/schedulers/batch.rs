//! Batch scheduling for fixed-length job pools.
//!
//! Every job of a [`FixedLengthJobPool`] runs for the pool-wide length `p`
//! as one contiguous batch inside its window, so scheduling reduces to
//! packing jobs into `p`-slot batches of at most `max_concurrency` jobs
//! each. Jobs are taken in deadline order; each joins the latest existing
//! batch that fits its window, and failing that opens a new batch as late
//! as possible within the window, skipping positions that collide with
//! batches already placed.

use crate::model::{FixedLengthJobPool, Pool, Schedule, TimeInterval};

use super::SchedulerError;

/// Deadline-ordered batch packer for fixed-length pools.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchScheduler;

impl BatchScheduler {
    pub fn new() -> Self {
        Self
    }

    pub fn process(
        &self,
        pool: &FixedLengthJobPool,
        max_concurrency: u32,
    ) -> Result<Schedule, SchedulerError> {
        if max_concurrency == 0 {
            return Err(SchedulerError::InvalidConcurrency);
        }
        let p = pool.length();
        let jobs = pool.jobs();

        let mut order: Vec<usize> = (0..jobs.len()).collect();
        order.sort_by_key(|&i| {
            (
                jobs[i].deadline().unwrap_or(0),
                jobs[i].release().unwrap_or(0),
                i,
            )
        });

        // Batches sorted by start; each holds at most `max_concurrency` jobs.
        let mut batches: Vec<(TimeInterval, Vec<usize>)> = Vec::new();

        for &i in &order {
            let Some((release, deadline)) = jobs[i].release().zip(jobs[i].deadline()) else {
                return Ok(Schedule::infeasible());
            };

            let joinable = batches.iter().rposition(|(interval, members)| {
                (members.len() as u32) < max_concurrency
                    && release <= interval.start()
                    && interval.end() <= deadline
            });
            if let Some(k) = joinable {
                batches[k].1.push(i);
                continue;
            }

            let position = (release..=deadline + 1 - p).rev().find(|&start| {
                let candidate = TimeInterval::new(start, start + p - 1);
                batches.iter().all(|(interval, _)| !interval.overlaps(&candidate))
            });
            match position {
                Some(start) => {
                    let interval = TimeInterval::new(start, start + p - 1);
                    let at = batches.iter().position(|(iv, _)| iv.start() > start);
                    let entry = (interval, vec![i]);
                    match at {
                        Some(k) => batches.insert(k, entry),
                        None => batches.push(entry),
                    }
                }
                None => return Ok(Schedule::infeasible()),
            }
        }

        let mut assignments: Vec<Vec<u32>> = vec![Vec::new(); jobs.len()];
        for (interval, members) in &batches {
            for &i in members {
                assignments[i] = interval.timestamps().collect();
            }
        }
        Ok(Schedule::from_assignments(jobs, &assignments))
    }
}
