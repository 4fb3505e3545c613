// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal access.
//!
//! The sync engine talks to terminals through the [`DeviceConnector`] and
//! [`DeviceConnection`] traits so the orchestration can be tested against a
//! fault-injecting mock. [`DeviceSession`] wraps a connection with timeouts
//! and the capture pause/resume bracket.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────┐
//! │ DeviceSession│────►│ DeviceConnection │────►│ Terminal │
//! │  (timeouts)  │◄────│     (trait)      │◄────│  (ZK)    │
//! └──────────────┘     └──────────────────┘     └──────────┘
//! ```

mod session;
mod zk;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use chrono::NaiveDateTime;
use ps_core::{DeviceIdentity, DeviceUser, Timestamped};

pub use session::{DeviceSession, SessionTimeouts, WindowRead};
pub use zk::{ZkConnection, ZkConnector};

/// Error type for device operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeviceError {
    /// The terminal could not be reached or refused the handshake.
    #[error("cannot connect to {device}: {reason}")]
    Connection { device: String, reason: String },

    /// A read failed after connecting.
    #[error("read failed: {0}")]
    Read(String),

    /// Pausing or resuming event capture failed.
    #[error("capture control failed: {0}")]
    Capture(String),

    /// The terminal did not answer in time.
    #[error("{operation} timed out after {}s", timeout.as_secs())]
    Timeout { operation: &'static str, timeout: Duration },

    #[error("session is not connected")]
    NotConnected,

    #[error("close failed: {0}")]
    Close(String),
}

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Boxed future returned by device trait methods.
pub type DeviceFuture<'a, T> = Pin<Box<dyn Future<Output = DeviceResult<T>> + Send + 'a>>;

/// An attendance entry as read from the terminal, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPunch {
    pub user_id: String,
    pub timestamp: NaiveDateTime,
}

impl Timestamped for RawPunch {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Opens connections to a terminal.
pub trait DeviceConnector: Send + Sync {
    type Connection: DeviceConnection;

    /// Establishes a session. No retries.
    fn connect(&self, device: &DeviceIdentity, timeout: Duration) -> DeviceFuture<'_, Self::Connection>;
}

/// One exclusive connection to a terminal.
///
/// Implementations are not reentrant: callers issue one operation at a time.
pub trait DeviceConnection: Send {
    /// Stops the terminal from recording new punches.
    fn pause_capture(&mut self) -> DeviceFuture<'_, ()>;

    /// Lets the terminal record punches again.
    fn resume_capture(&mut self) -> DeviceFuture<'_, ()>;

    /// Reads every stored attendance entry.
    fn read_all(&mut self) -> DeviceFuture<'_, Vec<RawPunch>>;

    /// Reads the enrolled users.
    fn read_users(&mut self) -> DeviceFuture<'_, Vec<DeviceUser>>;

    fn close(&mut self) -> DeviceFuture<'_, ()>;
}

#[cfg(test)]
pub(crate) mod test_helpers;
