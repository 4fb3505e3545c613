// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn invalid_setting_names_value_and_hint() {
    let err = Error::InvalidSetting {
        name: "ZKTECO_DEVICE_PORT",
        value: "abc".to_string(),
        hint: "use a port number between 1 and 65535",
    };
    let msg = err.to_string();
    assert!(msg.contains("ZKTECO_DEVICE_PORT"));
    assert!(msg.contains("'abc'"));
    assert!(msg.contains("hint: use a port number"));
}

#[test]
fn missing_setting_names_operation() {
    let err = Error::MissingSetting {
        name: "api_url",
        operation: "sync",
        hint: "set SUPABASE_URL or pass --api-url",
    };
    assert!(err.to_string().starts_with("api_url is required for sync"));
}

#[test]
fn sync_failure_shows_outcome() {
    let err = Error::SyncFailed(SyncOutcome::ConnectionFailed("connection refused".to_string()));
    assert_eq!(err.to_string(), "sync failed: connection failed: connection refused");
}

#[test]
fn core_error_converts() {
    let err: Error = ps_core::Error::InvalidPort(0).into();
    assert!(err.to_string().starts_with("invalid device: invalid device port: 0"));
}
