// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery of punch batches to the remote ingestion endpoint.
//!
//! One batch per cycle, posted as a single JSON request. The backend
//! deduplicates, so re-sending punches from an overlapping window is safe.

mod client;
mod payload;

use std::future::Future;
use std::pin::Pin;

use ps_core::{AttendancePunch, DeviceIdentity};

pub use client::IngestionClient;
pub use payload::{SyncRequest, SyncResponse};

/// Error type for delivery attempts.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeliveryError {
    /// The request never got a response (timeout, refused, reset).
    #[error("request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// A 2xx response carried an application-level `error`.
    #[error("rejected by backend: {0}")]
    Rejected(String),

    /// A 2xx response whose body could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Counts reported by the backend for an accepted batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub fetched: u64,
    pub added: u64,
    /// Per-record problems that did not fail the batch.
    pub warnings: Vec<String>,
}

/// Boxed future returned by [`Ingest::deliver`].
pub type IngestFuture<'a> = Pin<Box<dyn Future<Output = Result<DeliveryReport, DeliveryError>> + Send + 'a>>;

/// Sends one batch of punches and interprets the reply.
pub trait Ingest: Send + Sync {
    fn deliver<'a>(&'a self, device: &'a DeviceIdentity, punches: &'a [AttendancePunch]) -> IngestFuture<'a>;
}

#[cfg(test)]
pub(crate) mod test_helpers;


#[cfg(test)]
mod payload_tests;
