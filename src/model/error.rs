use thiserror::Error;

use super::TimeInterval;

/// Precondition violations rejected at pool construction time.
///
/// These indicate caller bugs, not scheduling infeasibility: a pool that was
/// built successfully may still have no feasible schedule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("deadline {deadline} precedes release {release}")]
    InvertedWindow { release: u32, deadline: u32 },

    #[error("duration {duration} exceeds the {available} available slots")]
    DurationExceedsAvailability { duration: u32, available: u64 },

    #[error("window [{release}, {deadline}] is shorter than the pool's fixed length {length}")]
    WindowShorterThanLength {
        release: u32,
        deadline: u32,
        length: u32,
    },

    #[error("availability intervals must be ordered and disjoint: {prev} conflicts with {next}")]
    OverlappingAvailability {
        prev: TimeInterval,
        next: TimeInterval,
    },
}
