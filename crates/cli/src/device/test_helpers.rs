// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fault-injecting device mock shared by device and sync tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use ps_core::{DeviceIdentity, DeviceUser};

use super::{DeviceConnection, DeviceConnector, DeviceError, DeviceFuture, RawPunch};

/// Calls observed by a [`MockDevice`], across all of its connections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calls {
    pub connects: usize,
    pub pauses: usize,
    pub reads: usize,
    pub resumes: usize,
    pub user_reads: usize,
    pub closes: usize,
}

/// Steps that should fail. `hang_read` never completes the bulk read.
#[derive(Debug, Clone, Default)]
pub struct Faults {
    pub connect: bool,
    pub pause: bool,
    pub read: bool,
    pub resume: bool,
    pub close: bool,
    pub hang_read: bool,
}

#[derive(Clone, Default)]
pub struct MockDevice {
    punches: Vec<RawPunch>,
    users: Vec<DeviceUser>,
    faults: Faults,
    calls: Arc<Mutex<Calls>>,
}

impl MockDevice {
    pub fn new(punches: Vec<RawPunch>) -> Self {
        MockDevice { punches, ..MockDevice::default() }
    }

    pub fn with_users(mut self, users: Vec<DeviceUser>) -> Self {
        self.users = users;
        self
    }

    pub fn with_faults(mut self, faults: Faults) -> Self {
        self.faults = faults;
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }
}

pub struct MockConnection {
    device: MockDevice,
}

impl MockConnection {
    fn record(&self, f: impl FnOnce(&mut Calls)) {
        f(&mut self.device.calls.lock().unwrap());
    }
}

impl DeviceConnector for MockDevice {
    type Connection = MockConnection;

    fn connect(&self, device: &DeviceIdentity, _timeout: Duration) -> DeviceFuture<'_, MockConnection> {
        let device = device.clone();
        Box::pin(async move {
            self.calls.lock().unwrap().connects += 1;
            if self.faults.connect {
                return Err(DeviceError::Connection { device: device.to_string(), reason: "connection refused".into() });
            }
            Ok(MockConnection { device: self.clone() })
        })
    }
}

impl DeviceConnection for MockConnection {
    fn pause_capture(&mut self) -> DeviceFuture<'_, ()> {
        Box::pin(async move {
            self.record(|c| c.pauses += 1);
            if self.device.faults.pause {
                return Err(DeviceError::Capture("disable rejected".into()));
            }
            Ok(())
        })
    }

    fn resume_capture(&mut self) -> DeviceFuture<'_, ()> {
        Box::pin(async move {
            self.record(|c| c.resumes += 1);
            if self.device.faults.resume {
                return Err(DeviceError::Capture("enable rejected".into()));
            }
            Ok(())
        })
    }

    fn read_all(&mut self) -> DeviceFuture<'_, Vec<RawPunch>> {
        Box::pin(async move {
            self.record(|c| c.reads += 1);
            if self.device.faults.hang_read {
                std::future::pending::<()>().await;
            }
            if self.device.faults.read {
                return Err(DeviceError::Read("connection reset mid-transfer".into()));
            }
            Ok(self.device.punches.clone())
        })
    }

    fn read_users(&mut self) -> DeviceFuture<'_, Vec<DeviceUser>> {
        Box::pin(async move {
            self.record(|c| c.user_reads += 1);
            if self.device.faults.read {
                return Err(DeviceError::Read("connection reset".into()));
            }
            Ok(self.device.users.clone())
        })
    }

    fn close(&mut self) -> DeviceFuture<'_, ()> {
        Box::pin(async move {
            self.record(|c| c.closes += 1);
            if self.device.faults.close {
                return Err(DeviceError::Close("socket already gone".into()));
            }
            Ok(())
        })
    }
}

pub fn device() -> DeviceIdentity {
    DeviceIdentity::new("10.0.0.5", 4370).unwrap()
}

/// Noon on the given day of March 2026.
pub fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
}

pub fn raw(user_id: &str, timestamp: NaiveDateTime) -> RawPunch {
    RawPunch { user_id: user_id.to_string(), timestamp }
}
