//! Job pools: append-only collections of jobs of a single variant.
//!
//! Each pool validates the variant-specific preconditions on `add_job` and
//! hands out jobs in insertion order. Schedulers borrow pools immutably; the
//! only mutation besides appending is [`pop_job`](JobPool::pop_job), which
//! feasibility-guided generators use to backtrack.

use super::{Job, JobId, PoolError, TimeInterval};

/// Read access shared by every pool variant.
///
/// Consumers that work on any job variant (the brute-force oracle, the
/// validation utilities) are generic over this trait; the specialised
/// schedulers take the concrete pool type they support instead.
pub trait Pool {
    /// Jobs in insertion order.
    fn jobs(&self) -> &[Job];

    /// Number of jobs in the pool.
    fn size(&self) -> usize {
        self.jobs().len()
    }

    fn is_empty(&self) -> bool {
        self.jobs().is_empty()
    }
}

fn checked_window(release: u32, deadline: u32) -> Result<TimeInterval, PoolError> {
    if deadline < release {
        return Err(PoolError::InvertedWindow { release, deadline });
    }
    Ok(TimeInterval::new(release, deadline))
}

/// Validates an availability list: intervals must be well formed, ordered,
/// and disjoint. Abutting intervals are merged so the stored form is
/// canonical.
fn checked_availability(intervals: &[(u32, u32)]) -> Result<Vec<TimeInterval>, PoolError> {
    let mut availability: Vec<TimeInterval> = Vec::with_capacity(intervals.len());
    for &(start, end) in intervals {
        let interval = checked_window(start, end)?;
        match availability.last_mut() {
            Some(prev) if start <= prev.end() => {
                return Err(PoolError::OverlappingAvailability {
                    prev: *prev,
                    next: interval,
                });
            }
            Some(prev) if start == prev.end() + 1 => {
                *prev = TimeInterval::new(prev.start(), end);
            }
            _ => availability.push(interval),
        }
    }
    Ok(availability)
}

macro_rules! impl_pool_common {
    ($pool:ident) => {
        impl Pool for $pool {
            fn jobs(&self) -> &[Job] {
                &self.jobs
            }
        }

        impl $pool {
            /// Removes and returns the most recently added job.
            pub fn pop_job(&mut self) -> Option<Job> {
                self.jobs.pop()
            }
        }
    };
}

/// Pool of [`Job::Interval`] jobs: contiguous windows, arbitrary durations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPool {
    jobs: Vec<Job>,
}

impl JobPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job with availability `[release, deadline]`.
    ///
    /// # Errors
    ///
    /// Rejects inverted windows and durations longer than the window.
    pub fn add_job(
        &mut self,
        release: u32,
        deadline: u32,
        duration: u32,
    ) -> Result<JobId, PoolError> {
        let window = checked_window(release, deadline)?;
        if u64::from(duration) > window.duration() {
            return Err(PoolError::DurationExceedsAvailability {
                duration,
                available: window.duration(),
            });
        }
        let id = JobId(self.jobs.len());
        self.jobs.push(Job::Interval {
            id,
            window,
            duration,
        });
        Ok(id)
    }
}

impl_pool_common!(JobPool);

/// Pool of [`Job::FixedLength`] jobs: every job runs for the pool-wide
/// `length`, as one contiguous batch inside its window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLengthJobPool {
    length: u32,
    jobs: Vec<Job>,
}

impl FixedLengthJobPool {
    /// Creates a pool whose jobs all run for `length` slots.
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero.
    pub fn new(length: u32) -> Self {
        assert!(length >= 1, "fixed job length must be at least 1");
        Self {
            length,
            jobs: Vec::new(),
        }
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// Adds a job with availability `[release, deadline]`.
    ///
    /// # Errors
    ///
    /// Rejects inverted windows and windows shorter than the pool length.
    pub fn add_job(&mut self, release: u32, deadline: u32) -> Result<JobId, PoolError> {
        let window = checked_window(release, deadline)?;
        if window.duration() < u64::from(self.length) {
            return Err(PoolError::WindowShorterThanLength {
                release,
                deadline,
                length: self.length,
            });
        }
        let id = JobId(self.jobs.len());
        self.jobs.push(Job::FixedLength {
            id,
            window,
            length: self.length,
        });
        Ok(id)
    }
}

impl_pool_common!(FixedLengthJobPool);

/// Pool of [`Job::Unit`] jobs: contiguous windows, duration 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitJobPool {
    jobs: Vec<Job>,
}

impl UnitJobPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit job with availability `[release, deadline]`.
    pub fn add_job(&mut self, release: u32, deadline: u32) -> Result<JobId, PoolError> {
        let window = checked_window(release, deadline)?;
        let id = JobId(self.jobs.len());
        self.jobs.push(Job::Unit { id, window });
        Ok(id)
    }
}

impl_pool_common!(UnitJobPool);

/// Pool of [`Job::MultiInterval`] jobs: disjoint availability intervals,
/// arbitrary durations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPoolMI {
    jobs: Vec<Job>,
}

impl JobPoolMI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job available on the given `(start, end)` intervals.
    ///
    /// # Errors
    ///
    /// Rejects malformed or overlapping intervals, and durations exceeding
    /// the total availability.
    pub fn add_job(&mut self, intervals: &[(u32, u32)], duration: u32) -> Result<JobId, PoolError> {
        let availability = checked_availability(intervals)?;
        let available: u64 = availability.iter().map(|iv| iv.duration()).sum();
        if u64::from(duration) > available {
            return Err(PoolError::DurationExceedsAvailability {
                duration,
                available,
            });
        }
        let id = JobId(self.jobs.len());
        self.jobs.push(Job::MultiInterval {
            id,
            availability,
            duration,
        });
        Ok(id)
    }
}

impl_pool_common!(JobPoolMI);

/// Pool of [`Job::UnitMultiInterval`] jobs: disjoint availability intervals,
/// duration 1.
///
/// An empty availability list is accepted; such a job can never run, so any
/// schedule over the pool is infeasible. This mirrors the decision-problem
/// use of the matching scheduler, where "no slot fits" is a result rather
/// than a construction error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitJobPoolMI {
    jobs: Vec<Job>,
}

impl UnitJobPoolMI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit job available on the given `(start, end)` intervals.
    pub fn add_job(&mut self, intervals: &[(u32, u32)]) -> Result<JobId, PoolError> {
        let availability = checked_availability(intervals)?;
        let id = JobId(self.jobs.len());
        self.jobs.push(Job::UnitMultiInterval { id, availability });
        Ok(id)
    }
}

impl_pool_common!(UnitJobPoolMI);
