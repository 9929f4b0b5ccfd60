//! Schedule produced by the schedulers.

use super::{Job, TimeInterval};

/// One job's placement: the ordered, disjoint intervals it executes in.
///
/// The summed interval durations equal the job's duration; zero-duration
/// jobs carry an empty interval list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobScheduleEntry {
    pub job: Job,
    pub execution_intervals: Vec<TimeInterval>,
}

/// Best-effort placement data some schedulers expose on infeasible input.
///
/// The lazy-activation schedulers report the slots and jobs they had placed
/// before hitting the unplaceable job. Consumers must not treat this as a
/// valid schedule; it exists for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialSchedule {
    pub active_time_intervals: Vec<TimeInterval>,
    pub job_schedules: Vec<JobScheduleEntry>,
}

/// Outcome of a scheduling run.
///
/// Infeasibility is a normal result, not an error: it means no assignment of
/// every job into its availability respects the concurrency bound. The
/// canonical accessors ([`active_time_intervals`](Schedule::active_time_intervals),
/// [`job_schedules`](Schedule::job_schedules)) return `None` for infeasible
/// results even when a partial payload is present.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Schedule {
    Feasible {
        /// Ordered, pairwise non-touching intervals of powered-on slots.
        active_time_intervals: Vec<TimeInterval>,
        /// One entry per pool job, in insertion order.
        job_schedules: Vec<JobScheduleEntry>,
    },
    Infeasible {
        partial: Option<PartialSchedule>,
    },
}

impl Schedule {
    /// Infeasible result with no partial data.
    pub fn infeasible() -> Self {
        Schedule::Infeasible { partial: None }
    }

    /// Builds a feasible schedule from per-job timestamp assignments.
    ///
    /// `assignments[i]` holds the slots job `jobs[i]` executes at; all
    /// interval construction funnels through [`TimeInterval::merge_timestamps`]
    /// so the active and per-job interval arithmetic cannot drift apart.
    pub(crate) fn from_assignments(jobs: &[Job], assignments: &[Vec<u32>]) -> Self {
        debug_assert_eq!(jobs.len(), assignments.len());
        let mut active: Vec<u32> = Vec::new();
        let mut job_schedules = Vec::with_capacity(jobs.len());
        for (job, slots) in jobs.iter().zip(assignments) {
            debug_assert_eq!(u64::from(job.duration()), slots.len() as u64);
            active.extend_from_slice(slots);
            job_schedules.push(JobScheduleEntry {
                job: job.clone(),
                execution_intervals: TimeInterval::merge_timestamps(slots.iter().copied()),
            });
        }
        Schedule::Feasible {
            active_time_intervals: TimeInterval::merge_timestamps(active),
            job_schedules,
        }
    }

    /// Whether every pool job was placed.
    pub fn all_jobs_scheduled(&self) -> bool {
        matches!(self, Schedule::Feasible { .. })
    }

    /// Active intervals of a feasible schedule.
    pub fn active_time_intervals(&self) -> Option<&[TimeInterval]> {
        match self {
            Schedule::Feasible {
                active_time_intervals,
                ..
            } => Some(active_time_intervals),
            Schedule::Infeasible { .. } => None,
        }
    }

    /// Per-job placements of a feasible schedule.
    pub fn job_schedules(&self) -> Option<&[JobScheduleEntry]> {
        match self {
            Schedule::Feasible { job_schedules, .. } => Some(job_schedules),
            Schedule::Infeasible { .. } => None,
        }
    }

    /// Best-effort partial data of an infeasible schedule, if the scheduler
    /// produced any.
    pub fn partial(&self) -> Option<&PartialSchedule> {
        match self {
            Schedule::Feasible { .. } => None,
            Schedule::Infeasible { partial } => partial.as_ref(),
        }
    }

    /// Total number of active slots (the minimisation objective), when
    /// feasible.
    pub fn total_active_time(&self) -> Option<u64> {
        self.active_time_intervals()
            .map(|intervals| intervals.iter().map(|iv| iv.duration()).sum())
    }
}
