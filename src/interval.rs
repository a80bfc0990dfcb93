use crate::error::BookingError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A time-boxed slot on a single calendar day. Times are wall-clock,
/// salon-local, minute precision. Invariant: `start < end`, enforced at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeInterval {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Self, BookingError> {
        if start >= end {
            return Err(BookingError::InvalidTimeOrder);
        }
        Ok(Self { date, start, end })
    }

    /// Half-open overlap test: touching endpoints (one interval ending
    /// exactly when the other starts) do NOT overlap. Intervals on different
    /// dates never overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }

    /// Inclusive containment: an interval spanning exactly a working window
    /// is contained in it. Intervals on different dates are never contained.
    pub fn contained_in(&self, outer: &TimeInterval) -> bool {
        self.date == outer.date && self.start >= outer.start && self.end <= outer.end
    }
}
