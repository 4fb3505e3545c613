// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use thiserror::Error;

/// Errors raised while talking to a terminal.
#[derive(Debug, Error)]
pub enum ZkError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no reply within {0:?}")]
    Timeout(Duration),

    #[error("malformed packet: {0}")]
    Malformed(String),

    #[error("command {command} rejected with reply code {code}")]
    Rejected { command: u16, code: u16 },

    #[error("terminal requires a communication key")]
    AuthRequired,

    #[error("unsupported {kind} entry size: {size} bytes")]
    UnsupportedEntrySize { kind: &'static str, size: usize },
}

pub type Result<T> = std::result::Result<T, ZkError>;
