// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wall clock abstraction.
//!
//! Terminals report timezone-naive local timestamps, so "now" is likewise
//! the naive local time of the host running the sync.

use chrono::{Local, NaiveDateTime};

/// Trait for providing the current local time. Allows injecting a fixed
/// clock in tests.
pub trait Clock: Send + Sync {
    /// Returns the current naive local time.
    fn now(&self) -> NaiveDateTime;
}

/// System clock implementation backed by `chrono::Local`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (*self).now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
