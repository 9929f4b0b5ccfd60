//! Data model: time intervals, jobs, pools, and schedules.

mod error;
mod interval;
mod job;
mod pool;
mod schedule;

pub use error::PoolError;
pub use interval::TimeInterval;
pub use job::{Job, JobId};
pub use pool::{FixedLengthJobPool, JobPool, JobPoolMI, Pool, UnitJobPool, UnitJobPoolMI};
pub use schedule::{JobScheduleEntry, PartialSchedule, Schedule};
