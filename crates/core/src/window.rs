// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{Duration, NaiveDateTime};

/// The time range `[cutoff, end)` considered by one sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncWindow {
    cutoff: NaiveDateTime,
    end: NaiveDateTime,
}

impl SyncWindow {
    /// Window ending at `now` and reaching `lookback` into the past.
    pub fn ending_at(now: NaiveDateTime, lookback: Duration) -> Self {
        let cutoff = now.checked_sub_signed(lookback).unwrap_or(NaiveDateTime::MIN);
        SyncWindow { cutoff, end: now }
    }

    pub fn cutoff(&self) -> NaiveDateTime {
        self.cutoff
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
