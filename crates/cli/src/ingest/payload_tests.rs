// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use ps_core::{AttendancePunch, DeviceIdentity};
use serde_json::json;

use super::*;

#[test]
fn request_body_uses_backend_field_names() {
    let device = DeviceIdentity::new("192.168.1.201", 4370).unwrap();
    let time = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap().and_hms_opt(7, 59, 1).unwrap();
    let punches = vec![AttendancePunch::new("12", time, &device)];

    let body = serde_json::to_value(SyncRequest::new(&device, &punches)).unwrap();
    assert_eq!(
        body,
        json!({
            "device_id": "192.168.1.201:4370",
            "device_ip": "192.168.1.201",
            "logs": [
                { "device_user_id": "12", "punch_time": "2026-03-14T07:59:01", "device_id": "192.168.1.201:4370" }
            ]
        })
    );
}

#[test]
fn response_fields_are_optional() {
    let parsed: SyncResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(parsed, SyncResponse::default());
}

#[test]
fn response_ignores_unknown_fields_and_nulls() {
    let parsed: SyncResponse = serde_json::from_str(
        r#"{"success": true, "records_fetched": 3, "records_added": 2, "errors": ["Employee not found for device_user_id: 9"], "error": null}"#,
    )
    .unwrap();
    assert_eq!(parsed.records_fetched, Some(3));
    assert_eq!(parsed.records_added, Some(2));
    assert_eq!(parsed.errors.unwrap().len(), 1);
    assert_eq!(parsed.error, None);
}
