// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ps_core::{Clock, DeviceIdentity, SyncOutcome, SyncWindow, SystemClock};
use tracing::{debug, error, info, warn};

use crate::device::{DeviceConnector, DeviceSession, SessionTimeouts, WindowRead};
use crate::ingest::Ingest;

/// Per-cycle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    pub lookback: chrono::Duration,
    pub timeouts: SessionTimeouts,
}

/// Everything a cycle needs, built once at startup.
pub struct SyncEngine<K, I, C = SystemClock> {
    connector: K,
    ingest: I,
    clock: C,
    device: DeviceIdentity,
    settings: SyncSettings,
}

impl<K: DeviceConnector, I: Ingest> SyncEngine<K, I> {
    pub fn new(connector: K, ingest: I, device: DeviceIdentity, settings: SyncSettings) -> Self {
        SyncEngine { connector, ingest, clock: SystemClock, device, settings }
    }
}

impl<K: DeviceConnector, I: Ingest, C: Clock> SyncEngine<K, I, C> {
    /// Replaces the wall clock used to compute the window.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> SyncEngine<K, I, C2> {
        SyncEngine {
            connector: self.connector,
            ingest: self.ingest,
            clock,
            device: self.device,
            settings: self.settings,
        }
    }

    pub fn device(&self) -> &DeviceIdentity {
        &self.device
    }

    /// Runs one full cycle.
    pub async fn run_cycle(&self) -> SyncOutcome {
        SyncRun::new(self).execute().await
    }
}

/// Progress of a [`SyncRun`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Connecting,
    Reading,
    Delivering,
    Done(SyncOutcome),
}

/// One connect, read, deliver, release cycle.
///
/// There are no retries within a run; the next scheduled run covers the
/// gap through the lookback window. The terminal session is closed exactly
/// once on every path before the outcome is reported.
pub struct SyncRun<'e, K, I, C> {
    engine: &'e SyncEngine<K, I, C>,
    state: RunState,
}

impl<'e, K: DeviceConnector, I: Ingest, C: Clock> SyncRun<'e, K, I, C> {
    pub fn new(engine: &'e SyncEngine<K, I, C>) -> Self {
        SyncRun { engine, state: RunState::Idle }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub async fn execute(&mut self) -> SyncOutcome {
        if let RunState::Done(outcome) = &self.state {
            return outcome.clone();
        }
        info!(device = %self.engine.device, "starting attendance sync");

        let engine = self.engine;
        let mut session = DeviceSession::new(&engine.connector, engine.device.clone(), engine.settings.timeouts);
        let outcome = self.drive(&mut session).await;
        session.close().await;

        log_outcome(&outcome);
        self.state = RunState::Done(outcome.clone());
        outcome
    }

    async fn drive(&mut self, session: &mut DeviceSession<'e, K>) -> SyncOutcome {
        let engine = self.engine;

        self.enter(RunState::Connecting);
        if let Err(e) = session.connect().await {
            return SyncOutcome::ConnectionFailed(e.to_string());
        }

        self.enter(RunState::Reading);
        let window = SyncWindow::ending_at(engine.clock.now(), engine.settings.lookback);
        let WindowRead { punches, resume_error } = match session.read_attendance_window(window.cutoff()).await {
            Ok(read) => read,
            Err(e) => return SyncOutcome::ConnectionFailed(e.to_string()),
        };

        // A failed resume was already logged by the session.
        if punches.is_empty() {
            return SyncOutcome::NoNewRecords;
        }

        self.enter(RunState::Delivering);
        let delivered = engine.ingest.deliver(&engine.device, &punches).await;
        match (delivered, resume_error) {
            (Err(e), _) => SyncOutcome::DeliveryFailed(e.to_string()),
            (Ok(report), Some(e)) => SyncOutcome::PartialFailure(format!(
                "capture not resumed: {}; batch delivered ({} added of {})",
                e, report.added, report.fetched
            )),
            (Ok(report), None) => {
                SyncOutcome::Success { added: report.added, fetched: report.fetched, warnings: report.warnings }
            }
        }
    }

    fn enter(&mut self, state: RunState) {
        debug!(from = ?self.state, to = ?state, "sync state");
        self.state = state;
    }
}

fn log_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Success { added, fetched, warnings } => {
            info!(added, fetched, "sync completed");
            for warning in warnings {
                warn!(%warning, "backend reported a record problem");
            }
        }
        SyncOutcome::NoNewRecords => info!("no new attendance records to sync"),
        failed => error!(outcome = %failed, "sync failed"),
    }
}
