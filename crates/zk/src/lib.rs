// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ps-zk: TCP client for ZKTeco-compatible attendance terminals
//!
//! This crate speaks the terminal's binary protocol: framed packets with a
//! checksummed header, buffered bulk reads, and the fixed-size user and
//! attendance record layouts used by the firmware.

pub mod client;
pub mod error;
pub mod protocol;
pub mod records;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::ZkClient;
pub use error::{Result, ZkError};
pub use records::{AttendanceRecord, Sizes, User};
