//! Discrete time-interval representation shared by all schedulers.

use std::fmt::Display;
use std::ops::RangeInclusive;

/// Inclusive range `[start, end]` of unit time slots.
///
/// Time is discrete: a timestamp is one indivisible slot, and both endpoints
/// belong to the interval, so `[3, 3]` covers exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeInterval {
    start: u32,
    end: u32,
}

impl TimeInterval {
    /// Creates interval `[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn new(start: u32, end: u32) -> Self {
        assert!(start <= end, "TimeInterval start must be <= end");
        Self { start, end }
    }

    pub const fn start(&self) -> u32 {
        self.start
    }

    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Number of slots covered, `end - start + 1`.
    pub const fn duration(&self) -> u64 {
        (self.end - self.start) as u64 + 1
    }

    /// Returns true if `t` ∈ `[start, end]`.
    pub const fn contains(&self, t: u32) -> bool {
        self.start <= t && t <= self.end
    }

    /// Checks if this interval shares at least one slot with `other`.
    pub const fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this interval overlaps or directly abuts `other`.
    pub const fn touches(&self, other: &TimeInterval) -> bool {
        // Saturating arithmetic keeps `[0, _]` from wrapping.
        self.start.saturating_sub(1) <= other.end && other.start.saturating_sub(1) <= self.end
    }

    pub fn intersection(&self, other: &TimeInterval) -> Option<TimeInterval> {
        if self.overlaps(other) {
            Some(TimeInterval::new(
                self.start.max(other.start),
                self.end.min(other.end),
            ))
        } else {
            None
        }
    }

    /// Iterates over the covered timestamps, `start, start + 1, …, end`.
    pub fn timestamps(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Collapses a set of timestamps into the ordered sequence of maximal
    /// contiguous intervals covering exactly that set.
    ///
    /// Duplicates are ignored; the input order is irrelevant.
    ///
    /// # Example
    ///
    /// ```
    /// use active_time_scheduling::model::TimeInterval;
    ///
    /// let intervals = TimeInterval::merge_timestamps([5, 1, 2, 3, 7]);
    /// assert_eq!(
    ///     intervals,
    ///     vec![
    ///         TimeInterval::new(1, 3),
    ///         TimeInterval::new(5, 5),
    ///         TimeInterval::new(7, 7),
    ///     ]
    /// );
    /// ```
    pub fn merge_timestamps<I: IntoIterator<Item = u32>>(timestamps: I) -> Vec<TimeInterval> {
        let mut timestamps: Vec<u32> = timestamps.into_iter().collect();
        timestamps.sort_unstable();
        timestamps.dedup();

        let mut merged: Vec<TimeInterval> = Vec::new();
        for t in timestamps {
            match merged.last_mut() {
                Some(last) if last.end + 1 == t => last.end = t,
                _ => merged.push(TimeInterval::new(t, t)),
            }
        }
        merged
    }
}

impl Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl IntoIterator for &TimeInterval {
    type Item = u32;
    type IntoIter = RangeInclusive<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.timestamps()
    }
}

// =============================================================================
// TimeInterval Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for TimeInterval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("TimeInterval", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimeInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            start: u32,
            end: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.start > raw.end {
            return Err(serde::de::Error::custom(format!(
                "inverted interval [{}, {}]",
                raw.start, raw.end
            )));
        }
        Ok(Self::new(raw.start, raw.end))
    }
}
