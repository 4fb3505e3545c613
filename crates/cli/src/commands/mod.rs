// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod config;
pub mod sync;
pub mod users;

use tokio::runtime::Runtime;

use crate::error::{Error, Result};

/// Builds the runtime a command blocks on.
fn runtime() -> Result<Runtime> {
    Runtime::new().map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))
}
