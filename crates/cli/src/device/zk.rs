// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ZKTeco-compatible terminals over TCP.

use std::time::Duration;

use ps_core::{DeviceIdentity, DeviceUser};
use ps_zk::{ZkClient, ZkError};

use super::{DeviceConnection, DeviceConnector, DeviceError, DeviceFuture, RawPunch};

/// Connects to terminals with [`ZkClient`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ZkConnector;

impl DeviceConnector for ZkConnector {
    type Connection = ZkConnection;

    fn connect(&self, device: &DeviceIdentity, timeout: Duration) -> DeviceFuture<'_, ZkConnection> {
        let device = device.clone();
        Box::pin(async move {
            let client = ZkClient::connect(device.ip(), device.port(), timeout).await.map_err(|e| {
                DeviceError::Connection { device: device.to_string(), reason: e.to_string() }
            })?;
            Ok(ZkConnection { client: Some(client) })
        })
    }
}

/// An open ZK session. Empty once closed.
pub struct ZkConnection {
    client: Option<ZkClient>,
}

impl ZkConnection {
    fn client(&mut self) -> Result<&mut ZkClient, DeviceError> {
        self.client.as_mut().ok_or(DeviceError::NotConnected)
    }
}

fn capture_error(e: ZkError) -> DeviceError {
    DeviceError::Capture(e.to_string())
}

fn read_error(e: ZkError) -> DeviceError {
    DeviceError::Read(e.to_string())
}

impl DeviceConnection for ZkConnection {
    fn pause_capture(&mut self) -> DeviceFuture<'_, ()> {
        Box::pin(async move { self.client()?.disable_device().await.map_err(capture_error) })
    }

    fn resume_capture(&mut self) -> DeviceFuture<'_, ()> {
        Box::pin(async move { self.client()?.enable_device().await.map_err(capture_error) })
    }

    fn read_all(&mut self) -> DeviceFuture<'_, Vec<RawPunch>> {
        Box::pin(async move {
            let records = self.client()?.get_attendance().await.map_err(read_error)?;
            Ok(records.into_iter().map(|r| RawPunch { user_id: r.user_id, timestamp: r.timestamp }).collect())
        })
    }

    fn read_users(&mut self) -> DeviceFuture<'_, Vec<DeviceUser>> {
        Box::pin(async move {
            let users = self.client()?.get_users().await.map_err(read_error)?;
            Ok(users
                .into_iter()
                .map(|u| DeviceUser { user_id: u.user_id, name: u.name, privilege: u.privilege, card: u.card })
                .collect())
        })
    }

    fn close(&mut self) -> DeviceFuture<'_, ()> {
        Box::pin(async move {
            match self.client.take() {
                Some(client) => client.disconnect().await.map_err(|e| DeviceError::Close(e.to_string())),
                None => Ok(()),
            }
        })
    }
}
