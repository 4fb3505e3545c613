// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use std::collections::HashMap;
use tempfile::TempDir;
use yare::parameterized;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_defaults() {
    let config = Config::from_layer(ConfigLayer::default()).unwrap();
    assert_eq!(config.device.device_id(), "192.168.1.201:4370");
    assert_eq!(config.sync_interval, Duration::from_secs(15 * 60));
    assert_eq!(config.lookback_days, 7);
    assert_eq!(config.lookback(), chrono::Duration::days(7));
    assert_eq!(config.connect_timeout, Duration::from_secs(10));
    assert_eq!(config.read_timeout, Duration::from_secs(30));
    assert_eq!(config.api_timeout, Duration::from_secs(60));
    assert_eq!(config.ingest_path, "/functions/v1/sync-attendance");
    assert!(config.api_url.is_none());
}

#[test]
fn test_env_layer_reads_known_variables() {
    let layer = ConfigLayer::from_lookup(lookup(&[
        ("ZKTECO_DEVICE_IP", "10.1.1.7"),
        ("ZKTECO_DEVICE_PORT", "4371"),
        ("SUPABASE_URL", "https://example.supabase.co"),
        ("SUPABASE_ANON_KEY", "anon"),
        ("SYNC_INTERVAL_MINUTES", "5"),
        ("PUNCHSYNC_LOG_FILE", "/tmp/punchsync.log"),
    ]))
    .unwrap();
    assert_eq!(layer.device_ip.as_deref(), Some("10.1.1.7"));
    assert_eq!(layer.device_port, Some(4371));
    assert_eq!(layer.api_url.as_deref(), Some("https://example.supabase.co"));
    assert_eq!(layer.api_key.as_deref(), Some("anon"));
    assert_eq!(layer.sync_interval_minutes, Some(5));
    assert_eq!(layer.log_file, Some(PathBuf::from("/tmp/punchsync.log")));
    assert_eq!(layer.lookback_days, None);
}

#[parameterized(
    port_text = { "ZKTECO_DEVICE_PORT", "abc" },
    port_overflow = { "ZKTECO_DEVICE_PORT", "70000" },
    interval_text = { "SYNC_INTERVAL_MINUTES", "soon" },
)]
fn test_env_layer_rejects_bad_numbers(name: &str, value: &str) {
    let err = ConfigLayer::from_lookup(lookup(&[(name, value)])).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains(name), "{msg}");
    assert!(msg.contains(value), "{msg}");
}

#[test]
fn test_higher_layer_wins() {
    let flags = ConfigLayer { device_ip: Some("10.0.0.1".into()), ..ConfigLayer::default() };
    let env = ConfigLayer {
        device_ip: Some("10.0.0.2".into()),
        device_port: Some(5000),
        ..ConfigLayer::default()
    };
    let file = ConfigLayer {
        device_port: Some(6000),
        lookback_days: Some(3),
        ..ConfigLayer::default()
    };
    let merged = flags.or(env).or(file);
    assert_eq!(merged.device_ip.as_deref(), Some("10.0.0.1"));
    assert_eq!(merged.device_port, Some(5000));
    assert_eq!(merged.lookback_days, Some(3));
}

#[parameterized(
    interval = { ConfigLayer { sync_interval_minutes: Some(0), ..ConfigLayer::default() }, "sync_interval_minutes" },
    interval_overflow = { ConfigLayer { sync_interval_minutes: Some(1 << 62), ..ConfigLayer::default() }, "sync_interval_minutes" },
    interval_max = { ConfigLayer { sync_interval_minutes: Some(u64::MAX), ..ConfigLayer::default() }, "sync_interval_minutes" },
    lookback = { ConfigLayer { lookback_days: Some(0), ..ConfigLayer::default() }, "lookback_days" },
    connect = { ConfigLayer { connect_timeout_secs: Some(0), ..ConfigLayer::default() }, "connect_timeout_secs" },
    api_timeout = { ConfigLayer { api_timeout_secs: Some(0), ..ConfigLayer::default() }, "api_timeout_secs" },
    scheme = { ConfigLayer { api_url: Some("ftp://x".into()), ..ConfigLayer::default() }, "api_url" },
    port = { ConfigLayer { device_port: Some(0), ..ConfigLayer::default() }, "port" },
)]
fn test_validation_rejects(layer: ConfigLayer, needle: &str) {
    let err = Config::from_layer(layer).unwrap_err();
    assert!(err.to_string().contains(needle), "{err}");
}

#[test]
fn test_api_requires_url_and_key() {
    let config = Config::from_layer(ConfigLayer::default()).unwrap();
    assert!(config.api().unwrap_err().to_string().contains("api_url is required"));

    let config =
        Config::from_layer(ConfigLayer { api_url: Some("https://x.test".into()), ..ConfigLayer::default() }).unwrap();
    assert!(config.api().unwrap_err().to_string().contains("api_key is required"));
}

#[test]
fn test_bearer_defaults_to_api_key() {
    let config = Config::from_layer(ConfigLayer {
        api_url: Some("https://x.test/".into()),
        api_key: Some("anon-key".into()),
        ..ConfigLayer::default()
    })
    .unwrap();
    let api = config.api().unwrap();
    assert_eq!(api.bearer_token, "anon-key");
    assert_eq!(api.endpoint(), "https://x.test/functions/v1/sync-attendance");
    assert_eq!(api.timeout, Duration::from_secs(60));
}

#[test]
fn test_distinct_bearer_token() {
    let config = Config::from_layer(ConfigLayer {
        api_url: Some("https://x.test".into()),
        api_key: Some("anon-key".into()),
        bearer_token: Some("service-token".into()),
        ..ConfigLayer::default()
    })
    .unwrap();
    assert_eq!(config.api().unwrap().bearer_token, "service-token");
}

#[test]
fn test_secrets_are_redacted() {
    let config = Config::from_layer(ConfigLayer {
        api_url: Some("https://x.test".into()),
        api_key: Some("super-secret".into()),
        ..ConfigLayer::default()
    })
    .unwrap();
    let shown = format!("{config}\n{config:?}\n{:?}", config.api().unwrap());
    assert!(!shown.contains("super-secret"));
    assert!(shown.contains("<redacted>"));
    assert!(shown.contains("api_url = \"https://x.test\""));
}

#[test]
fn test_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("punchsync.toml");
    std::fs::write(&path, "device_ip = \"10.9.9.9\"\nlookback_days = 14\nread_timeout_secs = 90\n").unwrap();
    let layer = ConfigLayer::from_file(&path).unwrap();
    assert_eq!(layer.device_ip.as_deref(), Some("10.9.9.9"));
    assert_eq!(layer.lookback_days, Some(14));
    assert_eq!(layer.read_timeout_secs, Some(90));
}

#[test]
fn test_from_file_rejects_unknown_keys() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("punchsync.toml");
    std::fs::write(&path, "device_addr = \"10.9.9.9\"\n").unwrap();
    let err = ConfigLayer::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("device_addr"), "{err}");
}

#[test]
fn test_from_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = ConfigLayer::from_file(&temp.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().starts_with("invalid config file"));
}

#[test]
fn test_resolve_flags_over_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "lookback_days = 2\ndevice_port = 4999\n").unwrap();
    let flags = ConfigLayer { device_port: Some(4444), ..ConfigLayer::default() };
    let config = resolve(temp.path(), None, flags).unwrap();
    assert_eq!(config.lookback_days, 2);
    assert_eq!(config.session_timeouts().connect, Duration::from_secs(10));
    // ZKTECO_DEVICE_PORT may be set in the test environment, but flags always win.
    assert_eq!(config.device.port(), 4444);
}
