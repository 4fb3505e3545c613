// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use ps_core::{AttendancePunch, DeviceIdentity};
use reqwest::Client;
use tracing::{debug, info};

use super::payload::{SyncRequest, SyncResponse};
use super::{DeliveryError, DeliveryReport, Ingest, IngestFuture};
use crate::config::ApiConfig;

/// Longest slice of an unparseable body quoted in errors.
const MAX_DETAIL_LEN: usize = 200;

/// HTTP client for the ingestion endpoint.
///
/// Every request carries the API key header and a bearer token.
pub struct IngestionClient {
    http: Client,
    endpoint: String,
    api_key: String,
    bearer_token: String,
}

impl IngestionClient {
    pub fn new(api: &ApiConfig) -> Result<Self, DeliveryError> {
        let http = Client::builder()
            .timeout(api.timeout)
            .connect_timeout(api.timeout.min(Duration::from_secs(10)))
            .user_agent(concat!("punchsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Ok(IngestionClient {
            http,
            endpoint: api.endpoint(),
            api_key: api.api_key.clone(),
            bearer_token: api.bearer_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, device: &DeviceIdentity, punches: &[AttendancePunch]) -> Result<DeliveryReport, DeliveryError> {
        debug!(endpoint = %self.endpoint, count = punches.len(), "posting attendance batch");
        let response = self
            .http
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.bearer_token)
            .json(&SyncRequest::new(device, punches))
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(describe(&e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| DeliveryError::Transport(describe(&e)))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<SyncResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| excerpt(&body));
            return Err(DeliveryError::Status { status: status.as_u16(), detail });
        }

        let parsed: SyncResponse =
            serde_json::from_str(&body).map_err(|e| DeliveryError::InvalidResponse(e.to_string()))?;
        if let Some(error) = parsed.error {
            return Err(DeliveryError::Rejected(error));
        }

        let report = DeliveryReport {
            fetched: parsed.records_fetched.unwrap_or(punches.len() as u64),
            added: parsed.records_added.unwrap_or(0),
            warnings: parsed.errors.unwrap_or_default(),
        };
        info!(fetched = report.fetched, added = report.added, warnings = report.warnings.len(), "batch accepted");
        Ok(report)
    }
}

impl Ingest for IngestionClient {
    fn deliver<'a>(&'a self, device: &'a DeviceIdentity, punches: &'a [AttendancePunch]) -> IngestFuture<'a> {
        Box::pin(self.post(device, punches))
    }
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    match trimmed.char_indices().nth(MAX_DETAIL_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
