// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Records read from an attendance terminal.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Wire format for punch timestamps: ISO-8601 without offset. Fractional
/// seconds are written only when present.
pub const PUNCH_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// The terminal a punch came from, addressed as `{ip}:{port}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    ip: String,
    port: u16,
}

impl DeviceIdentity {
    /// Creates an identity, rejecting empty or whitespace-bearing hosts and port 0.
    pub fn new(ip: impl Into<String>, port: u16) -> Result<Self> {
        let ip = ip.into();
        if ip.is_empty() || ip.chars().any(char::is_whitespace) {
            return Err(Error::InvalidAddress(ip));
        }
        if port == 0 {
            return Err(Error::InvalidPort(u32::from(port)));
        }
        Ok(DeviceIdentity { ip, port })
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Composite identifier used by the backend to tell terminals apart.
    pub fn device_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

impl FromStr for DeviceIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (ip, port) = s.rsplit_once(':').ok_or_else(|| Error::InvalidIdentity(s.to_string()))?;
        let port: u16 = port.parse().map_err(|_| Error::InvalidIdentity(s.to_string()))?;
        DeviceIdentity::new(ip, port)
    }
}

/// One biometric clock-in/out event.
///
/// Punches are immutable: they are built once from a device read and only
/// ever filtered and forwarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendancePunch {
    device_user_id: String,
    #[serde(serialize_with = "serialize_punch_time")]
    punch_time: NaiveDateTime,
    device_id: String,
}

impl AttendancePunch {
    pub fn new(device_user_id: impl Into<String>, punch_time: NaiveDateTime, device: &DeviceIdentity) -> Self {
        AttendancePunch { device_user_id: device_user_id.into(), punch_time, device_id: device.device_id() }
    }

    pub fn device_user_id(&self) -> &str {
        &self.device_user_id
    }

    pub fn punch_time(&self) -> NaiveDateTime {
        self.punch_time
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

fn serialize_punch_time<S: Serializer>(time: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(PUNCH_TIME_FORMAT))
}

/// A person enrolled on the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceUser {
    pub user_id: String,
    pub name: String,
    pub privilege: u8,
    pub card: u32,
}

impl DeviceUser {
    /// Human-readable privilege level.
    pub fn privilege_label(&self) -> &'static str {
        match self.privilege {
            0 => "user",
            2 => "enroller",
            6 => "manager",
            14 => "admin",
            _ => "custom",
        }
    }
}

#[cfg(test)]
#[path = "punch_tests.rs"]
mod tests;
