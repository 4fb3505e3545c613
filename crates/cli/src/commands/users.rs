// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `users` command: lists the users enrolled on the terminal.

use std::io::Write;

use ps_core::{DeviceIdentity, DeviceUser};

use super::runtime;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::device::{DeviceConnector, DeviceResult, DeviceSession, SessionTimeouts, ZkConnector};
use crate::error::Result;

pub fn run(config: &Config, output: OutputFormat) -> Result<()> {
    let users =
        runtime()?.block_on(fetch_users(&ZkConnector, config.device.clone(), config.session_timeouts()))?;
    write_users(&mut std::io::stdout().lock(), &users, output)
}

/// Connects, reads the user table and disconnects, even when the read fails.
pub async fn fetch_users<K: DeviceConnector>(
    connector: &K,
    device: DeviceIdentity,
    timeouts: SessionTimeouts,
) -> DeviceResult<Vec<DeviceUser>> {
    let mut session = DeviceSession::new(connector, device, timeouts);
    let users = match session.connect().await {
        Ok(()) => session.read_users().await,
        Err(e) => Err(e),
    };
    session.close().await;
    users
}

pub(crate) fn write_users(out: &mut impl Write, users: &[DeviceUser], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, users)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Device Users:")?;
            writeln!(out, "{}", "-".repeat(50))?;
            for user in users {
                writeln!(
                    out,
                    "  ID: {:>5}  Name: {}  Privilege: {}  Card: {}",
                    user.user_id,
                    user.name,
                    user.privilege_label(),
                    user.card
                )?;
            }
            writeln!(out, "\nTotal: {} users", users.len())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
