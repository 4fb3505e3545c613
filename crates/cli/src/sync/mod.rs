// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync cycle orchestration.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐  each tick  ┌──────────┐     ┌───────────────┐
//! │ Scheduler │────────────►│ SyncRun  │────►│ DeviceSession │
//! │  (timer)  │◄────────────│ (states) │     └───────────────┘
//! └───────────┘   outcome   └──────────┘     ┌───────────────┐
//!                                  └────────►│    Ingest     │
//!                                            └───────────────┘
//! ```
//!
//! A cycle connects, reads the lookback window, delivers it in one batch
//! and releases the terminal. Cycles never overlap and nothing but the
//! timer carries over from one cycle to the next.

mod run;
mod scheduler;

pub use run::{RunState, SyncEngine, SyncRun, SyncSettings};
pub use scheduler::{ScheduleReport, Scheduler};


#[cfg(test)]
mod scheduler_tests;
