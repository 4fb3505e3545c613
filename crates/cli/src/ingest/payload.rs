// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ps_core::{AttendancePunch, DeviceIdentity};
use serde::{Deserialize, Serialize};

/// Request body for the ingestion endpoint.
#[derive(Debug, Serialize)]
pub struct SyncRequest<'a> {
    pub device_id: String,
    pub device_ip: &'a str,
    pub logs: &'a [AttendancePunch],
}

impl<'a> SyncRequest<'a> {
    pub fn new(device: &'a DeviceIdentity, punches: &'a [AttendancePunch]) -> Self {
        SyncRequest { device_id: device.device_id(), device_ip: device.ip(), logs: punches }
    }
}

/// Response body. Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub records_fetched: Option<u64>,
    #[serde(default)]
    pub records_added: Option<u64>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}
