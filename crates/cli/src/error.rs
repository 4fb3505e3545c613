// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ps_core::SyncOutcome;
use thiserror::Error;

use crate::device::DeviceError;
use crate::ingest::DeliveryError;

/// All possible errors that can occur in the punchsync library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value for {name}: '{value}'\n  hint: {hint}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        hint: &'static str,
    },

    #[error("{name} is required for {operation}\n  hint: {hint}")]
    MissingSetting {
        name: &'static str,
        operation: &'static str,
        hint: &'static str,
    },

    #[error("invalid config file {path}: {reason}")]
    ConfigFile { path: String, reason: String },

    #[error("invalid device: {0}")]
    Device(#[from] ps_core::Error),

    #[error("device error: {0}")]
    DeviceSession(#[from] DeviceError),

    #[error("ingestion client error: {0}")]
    Ingest(#[from] DeliveryError),

    #[error("sync failed: {0}")]
    SyncFailed(SyncOutcome),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for punchsync operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
