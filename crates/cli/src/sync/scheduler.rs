// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::future::Future;
use std::time::Duration;

use ps_core::SyncOutcome;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// When cycles run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Once,
    Every(Duration),
}

/// Tally of the cycles a scheduler ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    pub cycles: u64,
    pub failures: u64,
    pub last_outcome: Option<SyncOutcome>,
}

impl ScheduleReport {
    fn record(&mut self, outcome: SyncOutcome) {
        self.cycles += 1;
        if outcome.is_failure() {
            self.failures += 1;
        }
        self.last_outcome = Some(outcome);
    }
}

/// Drives sync cycles once or at a fixed interval.
///
/// In recurring mode the first cycle runs immediately. A failed cycle never
/// stops the schedule. Cycles run one at a time: the next tick is only
/// awaited once the current cycle finished, and a cycle that overruns the
/// interval delays the following ones instead of bursting.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    mode: Mode,
}

impl Scheduler {
    pub fn once() -> Self {
        Scheduler { mode: Mode::Once }
    }

    pub fn every(interval: Duration) -> Self {
        Scheduler { mode: Mode::Every(interval) }
    }

    pub fn interval(&self) -> Option<Duration> {
        match self.mode {
            Mode::Once => None,
            Mode::Every(interval) => Some(interval),
        }
    }

    /// Runs cycles until the schedule ends or `shutdown` is cancelled.
    ///
    /// Cancellation is abrupt: an in-flight cycle is dropped.
    pub async fn run<F, Fut>(&self, mut cycle: F, shutdown: CancellationToken) -> ScheduleReport
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = SyncOutcome>,
    {
        let mut report = ScheduleReport::default();
        match self.mode {
            Mode::Once => {
                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => warn!("sync interrupted"),
                    outcome = cycle() => report.record(outcome),
                }
            }
            Mode::Every(interval) => {
                info!(interval_minutes = interval.as_secs() / 60, "starting sync schedule");
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => break,
                        _ = ticker.tick() => {}
                    }
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => {
                            warn!("shutdown during sync cycle; abandoning it");
                            break;
                        }
                        outcome = cycle() => report.record(outcome),
                    }
                }
                info!(cycles = report.cycles, failures = report.failures, "sync schedule stopped");
            }
        }
        report
    }
}
