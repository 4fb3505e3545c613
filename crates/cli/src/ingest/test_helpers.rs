// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recording ingestion mock.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use ps_core::{AttendancePunch, DeviceIdentity};

use super::{DeliveryError, DeliveryReport, Ingest, IngestFuture};

#[derive(Clone)]
pub struct MockIngest {
    reply: Result<DeliveryReport, DeliveryError>,
    batches: Arc<Mutex<Vec<Vec<AttendancePunch>>>>,
}

impl MockIngest {
    /// Accepts every batch, reporting all punches as added.
    pub fn accepting() -> Self {
        MockIngest { reply: Ok(DeliveryReport::default()), batches: Arc::default() }
    }

    pub fn replying(reply: Result<DeliveryReport, DeliveryError>) -> Self {
        MockIngest { reply, batches: Arc::default() }
    }

    /// Batches delivered so far.
    pub fn batches(&self) -> Vec<Vec<AttendancePunch>> {
        self.batches.lock().unwrap().clone()
    }
}

impl Ingest for MockIngest {
    fn deliver<'a>(&'a self, _device: &'a DeviceIdentity, punches: &'a [AttendancePunch]) -> IngestFuture<'a> {
        Box::pin(async move {
            self.batches.lock().unwrap().push(punches.to_vec());
            match &self.reply {
                Ok(report) if *report == DeliveryReport::default() => Ok(DeliveryReport {
                    fetched: punches.len() as u64,
                    added: punches.len() as u64,
                    warnings: Vec::new(),
                }),
                other => other.clone(),
            }
        })
    }
}
