// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Result of one sync cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The backend accepted the batch. `warnings` carries per-record
    /// problems it reported without rejecting the batch.
    Success { added: u64, fetched: u64, warnings: Vec<String> },
    /// The lookback window held no punches; nothing was sent.
    NoNewRecords,
    /// The terminal could not be reached or read.
    ConnectionFailed(String),
    /// The backend could not be reached or refused the batch.
    DeliveryFailed(String),
    /// The batch was delivered but the terminal may be left with capture paused.
    PartialFailure(String),
}

impl SyncOutcome {
    /// Whether the cycle should count as failed (non-zero exit in once mode).
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SyncOutcome::ConnectionFailed(_) | SyncOutcome::DeliveryFailed(_) | SyncOutcome::PartialFailure(_)
        )
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            SyncOutcome::Success { warnings, .. } => warnings,
            _ => &[],
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Success { added, fetched, warnings } if warnings.is_empty() => {
                write!(f, "synced: {} added of {} sent", added, fetched)
            }
            SyncOutcome::Success { added, fetched, warnings } => {
                write!(f, "synced: {} added of {} sent ({} warnings)", added, fetched, warnings.len())
            }
            SyncOutcome::NoNewRecords => write!(f, "no new records"),
            SyncOutcome::ConnectionFailed(detail) => write!(f, "connection failed: {}", detail),
            SyncOutcome::DeliveryFailed(detail) => write!(f, "delivery failed: {}", detail),
            SyncOutcome::PartialFailure(detail) => write!(f, "partial failure: {}", detail),
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
