// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ps-core: Shared library for the punchsync attendance forwarder
//!
//! This crate provides the domain types and pure logic used by the sync
//! engine: punches and enrolled users as read from a terminal, the lookback
//! window, record filtering, and the outcome of a sync cycle. Nothing in
//! here performs I/O.

pub mod clock;
pub mod error;
pub mod filter;
pub mod outcome;
pub mod punch;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use filter::{RecordFilter, Timestamped};
pub use outcome::SyncOutcome;
pub use punch::{AttendancePunch, DeviceIdentity, DeviceUser};
pub use window::SyncWindow;
