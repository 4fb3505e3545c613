// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cutoff filtering for punch sequences.

use chrono::NaiveDateTime;

use crate::punch::AttendancePunch;

/// Anything carrying the instant it was recorded.
pub trait Timestamped {
    fn timestamp(&self) -> NaiveDateTime;
}

impl Timestamped for AttendancePunch {
    fn timestamp(&self) -> NaiveDateTime {
        self.punch_time()
    }
}

impl<T: Timestamped> Timestamped for &T {
    fn timestamp(&self) -> NaiveDateTime {
        (*self).timestamp()
    }
}

/// Keeps records at or after an optional cutoff.
///
/// Without a cutoff every record passes. Order is preserved and applying the
/// same filter twice yields the same result as applying it once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFilter {
    cutoff: Option<NaiveDateTime>,
}

impl RecordFilter {
    pub fn new(cutoff: Option<NaiveDateTime>) -> Self {
        RecordFilter { cutoff }
    }

    pub fn since(cutoff: NaiveDateTime) -> Self {
        RecordFilter { cutoff: Some(cutoff) }
    }

    /// A filter that keeps everything.
    pub fn all() -> Self {
        RecordFilter { cutoff: None }
    }

    pub fn cutoff(&self) -> Option<NaiveDateTime> {
        self.cutoff
    }

    pub fn matches<T: Timestamped>(&self, record: &T) -> bool {
        match self.cutoff {
            Some(cutoff) => record.timestamp() >= cutoff,
            None => true,
        }
    }

    pub fn apply<T: Timestamped>(&self, records: Vec<T>) -> Vec<T> {
        match self.cutoff {
            None => records,
            Some(_) => records.into_iter().filter(|r| self.matches(r)).collect(),
        }
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
