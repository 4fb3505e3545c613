// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDateTime;
use ps_core::{AttendancePunch, DeviceIdentity, DeviceUser, RecordFilter};
use tracing::{debug, info, warn};

use super::{DeviceConnection, DeviceConnector, DeviceError, DeviceResult};

/// Upper bounds for blocking device operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimeouts {
    pub connect: Duration,
    /// Applies to each capture toggle, bulk read and close.
    pub read: Duration,
}

/// Punches read from one attendance window.
#[derive(Debug)]
pub struct WindowRead {
    /// Punches at or after the cutoff, in device order.
    pub punches: Vec<AttendancePunch>,
    /// Set when capture could not be resumed after a successful read.
    pub resume_error: Option<DeviceError>,
}

/// Exclusive access to one terminal.
///
/// A session starts disconnected. [`close`](Self::close) is idempotent and
/// never fails, so callers can invoke it on every exit path.
pub struct DeviceSession<'c, K: DeviceConnector> {
    connector: &'c K,
    device: DeviceIdentity,
    timeouts: SessionTimeouts,
    connection: Option<K::Connection>,
}

impl<'c, K: DeviceConnector> DeviceSession<'c, K> {
    pub fn new(connector: &'c K, device: DeviceIdentity, timeouts: SessionTimeouts) -> Self {
        DeviceSession { connector, device, timeouts, connection: None }
    }

    pub fn device(&self) -> &DeviceIdentity {
        &self.device
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Opens the connection. A no-op when already connected.
    pub async fn connect(&mut self) -> DeviceResult<()> {
        if self.connection.is_some() {
            return Ok(());
        }
        let timeout = self.timeouts.connect;
        let connection = bounded("connect", timeout, self.connector.connect(&self.device, timeout)).await?;
        info!(device = %self.device, "connected to terminal");
        self.connection = Some(connection);
        Ok(())
    }

    /// Reads the punches recorded at or after `cutoff`.
    ///
    /// Capture is paused for the duration of the read and resumed on every
    /// path. If the read fails, resume is still attempted and its own
    /// failure is only logged. If the read succeeds but resume fails, the
    /// punches are returned together with the resume error.
    pub async fn read_attendance_window(&mut self, cutoff: NaiveDateTime) -> DeviceResult<WindowRead> {
        let timeout = self.timeouts.read;
        let connection = self.connection.as_mut().ok_or(DeviceError::NotConnected)?;

        let raw = match bounded("pause capture", timeout, connection.pause_capture()).await {
            Ok(()) => bounded("read attendance", timeout, connection.read_all()).await,
            Err(e) => Err(e),
        };
        let resumed = bounded("resume capture", timeout, connection.resume_capture()).await;

        let (raw, resume_error) = match (raw, resumed) {
            (Ok(raw), resumed) => (raw, resumed.err()),
            (Err(e), Ok(())) => return Err(e),
            (Err(e), Err(resume_err)) => {
                warn!(device = %self.device, error = %resume_err, "failed to resume capture after failed read");
                return Err(e);
            }
        };
        if let Some(err) = &resume_error {
            warn!(device = %self.device, error = %err, "terminal capture was not resumed");
        }

        let total = raw.len();
        let punches: Vec<AttendancePunch> = RecordFilter::since(cutoff)
            .apply(raw)
            .into_iter()
            .map(|p| AttendancePunch::new(p.user_id, p.timestamp, &self.device))
            .collect();
        info!(total, in_window = punches.len(), %cutoff, "read attendance log");
        Ok(WindowRead { punches, resume_error })
    }

    /// Reads enrolled users. Capture is left untouched.
    pub async fn read_users(&mut self) -> DeviceResult<Vec<DeviceUser>> {
        let timeout = self.timeouts.read;
        let connection = self.connection.as_mut().ok_or(DeviceError::NotConnected)?;
        bounded("read users", timeout, connection.read_users()).await
    }

    /// Releases the connection. Failures are logged, not returned.
    pub async fn close(&mut self) {
        let Some(mut connection) = self.connection.take() else {
            return;
        };
        match bounded("close", self.timeouts.read, connection.close()).await {
            Ok(()) => debug!(device = %self.device, "disconnected from terminal"),
            Err(e) => warn!(device = %self.device, error = %e, "failed to close terminal session cleanly"),
        }
    }
}

async fn bounded<T, F>(operation: &'static str, timeout: Duration, fut: F) -> DeviceResult<T>
where
    F: Future<Output = DeviceResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(DeviceError::Timeout { operation, timeout }),
    }
}
