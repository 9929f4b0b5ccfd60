//! Job variants handled by the schedulers.

use std::fmt::Display;

use super::TimeInterval;

/// Stable job identity: the index at which the job was added to its pool.
///
/// Used to order reporting and to break ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobId(pub usize);

impl Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A job together with the slots it may occupy.
///
/// The variants mirror the pool variants: contiguous-window jobs carry a
/// single availability interval, multi-interval jobs a disjoint ordered list.
/// `Unit`-flavoured jobs have duration 1, `FixedLength` jobs run for their
/// pool's uniform length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Job {
    Interval {
        id: JobId,
        window: TimeInterval,
        duration: u32,
    },
    FixedLength {
        id: JobId,
        window: TimeInterval,
        length: u32,
    },
    Unit {
        id: JobId,
        window: TimeInterval,
    },
    MultiInterval {
        id: JobId,
        availability: Vec<TimeInterval>,
        duration: u32,
    },
    UnitMultiInterval {
        id: JobId,
        availability: Vec<TimeInterval>,
    },
}

impl Job {
    pub fn id(&self) -> JobId {
        match self {
            Job::Interval { id, .. }
            | Job::FixedLength { id, .. }
            | Job::Unit { id, .. }
            | Job::MultiInterval { id, .. }
            | Job::UnitMultiInterval { id, .. } => *id,
        }
    }

    /// Number of unit slots the job must run for.
    pub fn duration(&self) -> u32 {
        match self {
            Job::Interval { duration, .. } => *duration,
            Job::FixedLength { length, .. } => *length,
            Job::Unit { .. } => 1,
            Job::MultiInterval { duration, .. } => *duration,
            Job::UnitMultiInterval { .. } => 1,
        }
    }

    /// The ordered, pairwise disjoint intervals the job may execute in.
    ///
    /// Empty only for multi-interval jobs constructed with no availability.
    pub fn availability(&self) -> &[TimeInterval] {
        match self {
            Job::Interval { window, .. }
            | Job::FixedLength { window, .. }
            | Job::Unit { window, .. } => std::slice::from_ref(window),
            Job::MultiInterval { availability, .. }
            | Job::UnitMultiInterval { availability, .. } => availability,
        }
    }

    /// Earliest slot the job may occupy.
    pub fn release(&self) -> Option<u32> {
        self.availability().first().map(|iv| iv.start())
    }

    /// Latest slot the job may occupy.
    pub fn deadline(&self) -> Option<u32> {
        self.availability().last().map(|iv| iv.end())
    }

    /// Total number of slots in the availability.
    pub fn total_availability(&self) -> u64 {
        self.availability().iter().map(|iv| iv.duration()).sum()
    }

    pub fn is_available_at(&self, t: u32) -> bool {
        self.availability().iter().any(|iv| iv.contains(t))
    }

    /// Iterates every timestamp the job may execute at, in increasing order.
    pub fn available_timestamps(&self) -> impl Iterator<Item = u32> + '_ {
        self.availability().iter().flat_map(|iv| iv.timestamps())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_job_accessors() {
        let job = Job::Interval {
            id: JobId(3),
            window: TimeInterval::new(2, 7),
            duration: 4,
        };
        assert_eq!(job.id(), JobId(3));
        assert_eq!(job.duration(), 4);
        assert_eq!(job.release(), Some(2));
        assert_eq!(job.deadline(), Some(7));
        assert_eq!(job.total_availability(), 6);
    }

    #[test]
    fn unit_job_has_duration_one() {
        let job = Job::Unit {
            id: JobId(0),
            window: TimeInterval::new(1, 4),
        };
        assert_eq!(job.duration(), 1);
    }

    #[test]
    fn multi_interval_availability_queries() {
        let job = Job::MultiInterval {
            id: JobId(1),
            availability: vec![TimeInterval::new(1, 2), TimeInterval::new(5, 6)],
            duration: 3,
        };
        assert_eq!(job.total_availability(), 4);
        assert!(job.is_available_at(2));
        assert!(!job.is_available_at(3));
        assert_eq!(
            job.available_timestamps().collect::<Vec<_>>(),
            vec![1, 2, 5, 6]
        );
    }

    #[test]
    fn empty_availability_has_no_window() {
        let job = Job::UnitMultiInterval {
            id: JobId(0),
            availability: Vec::new(),
        };
        assert_eq!(job.release(), None);
        assert_eq!(job.deadline(), None);
        assert_eq!(job.total_availability(), 0);
    }
}
