// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Settings flags shared by every command.
//!
//! These sit on top of the config file and environment; see
//! [`crate::config`] for the layering.

use std::path::PathBuf;

use clap::Args;

use crate::config::ConfigLayer;

#[derive(Args, Clone, Debug, Default)]
pub struct SettingsArgs {
    /// Config file (default: ./punchsync.toml when present)
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Terminal IP address or hostname
    #[arg(long, global = true, value_name = "host")]
    pub device_ip: Option<String>,

    /// Terminal TCP port
    #[arg(long, global = true, value_name = "port")]
    pub device_port: Option<u16>,

    /// Base URL of the ingestion API
    #[arg(long, global = true, value_name = "url")]
    pub api_url: Option<String>,

    /// API key sent with every batch
    #[arg(long, global = true, value_name = "key")]
    pub api_key: Option<String>,

    /// Minutes between cycles in daemon mode
    #[arg(long, global = true, value_name = "minutes")]
    pub interval: Option<u64>,

    /// Also append logs to this file
    #[arg(long, global = true, value_name = "path")]
    pub log_file: Option<PathBuf>,
}

impl SettingsArgs {
    /// The flags as the highest-priority config layer.
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            device_ip: self.device_ip.clone(),
            device_port: self.device_port,
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            sync_interval_minutes: self.interval,
            log_file: self.log_file.clone(),
            ..ConfigLayer::default()
        }
    }
}
