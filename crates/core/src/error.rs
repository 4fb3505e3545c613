// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ps-core operations.

use thiserror::Error;

/// All possible errors that can occur in ps-core operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid device address '{0}'\n  hint: use a hostname or IP address without spaces")]
    InvalidAddress(String),

    #[error("invalid device port: {0}\n  hint: the port must be between 1 and 65535")]
    InvalidPort(u32),

    #[error("invalid device identity '{0}'\n  hint: expected <ip>:<port>")]
    InvalidIdentity(String),
}

/// A specialized Result type for ps-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
