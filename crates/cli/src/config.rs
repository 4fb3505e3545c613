// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration.
//!
//! Settings are resolved once at startup from four layers, later layers
//! winning:
//! - built-in defaults
//! - `punchsync.toml` in the working directory, or the file given by `--config`
//! - `.env` plus process environment variables
//! - command line flags

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ps_core::DeviceIdentity;
use serde::Deserialize;

use crate::device::SessionTimeouts;
use crate::env::{self, vars};
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "punchsync.toml";

const DEFAULT_DEVICE_IP: &str = "192.168.1.201";
const DEFAULT_DEVICE_PORT: u16 = 4370;
const DEFAULT_SYNC_INTERVAL_MINUTES: u64 = 15;
const DEFAULT_LOOKBACK_DAYS: u32 = 7;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;
const DEFAULT_API_TIMEOUT_SECS: u64 = 60;
const DEFAULT_INGEST_PATH: &str = "/functions/v1/sync-attendance";

/// One source of settings. Unset fields fall through to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub device_ip: Option<String>,
    pub device_port: Option<u16>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
    pub sync_interval_minutes: Option<u64>,
    pub lookback_days: Option<u32>,
    pub connect_timeout_secs: Option<u64>,
    pub read_timeout_secs: Option<u64>,
    pub api_timeout_secs: Option<u64>,
    pub ingest_path: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigLayer {
    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Builds a layer from environment-style lookups.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(ConfigLayer {
            device_ip: lookup(vars::DEVICE_IP),
            device_port: parse_var(&lookup, vars::DEVICE_PORT, "use a port number between 1 and 65535")?,
            api_url: lookup(vars::API_URL),
            api_key: lookup(vars::API_KEY),
            bearer_token: lookup(vars::BEARER_TOKEN),
            sync_interval_minutes: parse_var(&lookup, vars::SYNC_INTERVAL_MINUTES, "use a whole number of minutes")?,
            log_file: lookup(vars::LOG_FILE).map(PathBuf::from),
            ..ConfigLayer::default()
        })
    }

    /// Builds a layer from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env::get)
    }

    /// Fills unset fields of `self` from `lower`.
    pub fn or(self, lower: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            device_ip: self.device_ip.or(lower.device_ip),
            device_port: self.device_port.or(lower.device_port),
            api_url: self.api_url.or(lower.api_url),
            api_key: self.api_key.or(lower.api_key),
            bearer_token: self.bearer_token.or(lower.bearer_token),
            sync_interval_minutes: self.sync_interval_minutes.or(lower.sync_interval_minutes),
            lookback_days: self.lookback_days.or(lower.lookback_days),
            connect_timeout_secs: self.connect_timeout_secs.or(lower.connect_timeout_secs),
            read_timeout_secs: self.read_timeout_secs.or(lower.read_timeout_secs),
            api_timeout_secs: self.api_timeout_secs.or(lower.api_timeout_secs),
            ingest_path: self.ingest_path.or(lower.ingest_path),
            log_file: self.log_file.or(lower.log_file),
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, hint: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(Error::InvalidSetting { name, value, hint }),
        },
    }
}

/// Credentials and endpoint for the ingestion API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub ingest_path: String,
    pub api_key: String,
    pub bearer_token: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Full URL batches are posted to.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.ingest_path.trim_start_matches('/'))
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("ingest_path", &self.ingest_path)
            .field("api_key", &redact(Some(&self.api_key)))
            .field("bearer_token", &redact(Some(&self.bearer_token)))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fully resolved configuration.
#[derive(Clone)]
pub struct Config {
    pub device: DeviceIdentity,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
    pub ingest_path: String,
    pub sync_interval: Duration,
    pub lookback_days: u32,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub api_timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Applies defaults to a merged layer and validates the result.
    pub fn from_layer(layer: ConfigLayer) -> Result<Self> {
        let device_ip = layer.device_ip.unwrap_or_else(|| DEFAULT_DEVICE_IP.to_string());
        let device = DeviceIdentity::new(device_ip, layer.device_port.unwrap_or(DEFAULT_DEVICE_PORT))?;

        if let Some(url) = &layer.api_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::InvalidSetting {
                    name: "api_url",
                    value: url.clone(),
                    hint: "the ingestion URL must start with http:// or https://",
                });
            }
        }

        let interval = positive("sync_interval_minutes", layer.sync_interval_minutes, DEFAULT_SYNC_INTERVAL_MINUTES)?;
        let interval_secs = interval.checked_mul(60).ok_or_else(|| Error::InvalidSetting {
            name: "sync_interval_minutes",
            value: interval.to_string(),
            hint: "use a realistic number of minutes, such as 15",
        })?;
        let lookback_days = layer.lookback_days.unwrap_or(DEFAULT_LOOKBACK_DAYS);
        if lookback_days == 0 {
            return Err(Error::InvalidSetting {
                name: "lookback_days",
                value: "0".to_string(),
                hint: "the lookback must be at least one day",
            });
        }

        Ok(Config {
            device,
            api_url: layer.api_url,
            api_key: layer.api_key,
            bearer_token: layer.bearer_token,
            ingest_path: layer.ingest_path.unwrap_or_else(|| DEFAULT_INGEST_PATH.to_string()),
            sync_interval: Duration::from_secs(interval_secs),
            lookback_days,
            connect_timeout: Duration::from_secs(positive(
                "connect_timeout_secs",
                layer.connect_timeout_secs,
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
            read_timeout: Duration::from_secs(positive(
                "read_timeout_secs",
                layer.read_timeout_secs,
                DEFAULT_READ_TIMEOUT_SECS,
            )?),
            api_timeout: Duration::from_secs(positive(
                "api_timeout_secs",
                layer.api_timeout_secs,
                DEFAULT_API_TIMEOUT_SECS,
            )?),
            log_file: layer.log_file,
        })
    }

    /// Ingestion settings, required by the sync modes.
    pub fn api(&self) -> Result<ApiConfig> {
        let base_url = self.api_url.clone().ok_or(Error::MissingSetting {
            name: "api_url",
            operation: "sync",
            hint: "set SUPABASE_URL, api_url in punchsync.toml, or pass --api-url",
        })?;
        let api_key = self.api_key.clone().ok_or(Error::MissingSetting {
            name: "api_key",
            operation: "sync",
            hint: "set SUPABASE_ANON_KEY, api_key in punchsync.toml, or pass --api-key",
        })?;
        Ok(ApiConfig {
            base_url,
            ingest_path: self.ingest_path.clone(),
            bearer_token: self.bearer_token.clone().unwrap_or_else(|| api_key.clone()),
            api_key,
            timeout: self.api_timeout,
        })
    }

    pub fn session_timeouts(&self) -> SessionTimeouts {
        SessionTimeouts { connect: self.connect_timeout, read: self.read_timeout }
    }

    pub fn lookback(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.lookback_days))
    }
}

fn positive(name: &'static str, value: Option<u64>, default: u64) -> Result<u64> {
    match value.unwrap_or(default) {
        0 => Err(Error::InvalidSetting { name, value: "0".to_string(), hint: "the value must be greater than zero" }),
        v => Ok(v),
    }
}

fn redact(secret: Option<&String>) -> &'static str {
    match secret {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("device", &self.device)
            .field("api_url", &self.api_url)
            .field("api_key", &redact(self.api_key.as_ref()))
            .field("bearer_token", &redact(self.bearer_token.as_ref()))
            .field("ingest_path", &self.ingest_path)
            .field("sync_interval", &self.sync_interval)
            .field("lookback_days", &self.lookback_days)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("api_timeout", &self.api_timeout)
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// TOML-style listing with secrets redacted.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "device_ip = \"{}\"", self.device.ip())?;
        writeln!(f, "device_port = {}", self.device.port())?;
        match &self.api_url {
            Some(url) => writeln!(f, "api_url = \"{}\"", url)?,
            None => writeln!(f, "# api_url = <unset>")?,
        }
        writeln!(f, "api_key = \"{}\"", redact(self.api_key.as_ref()))?;
        writeln!(f, "bearer_token = \"{}\"", redact(self.bearer_token.as_ref().or(self.api_key.as_ref())))?;
        writeln!(f, "ingest_path = \"{}\"", self.ingest_path)?;
        writeln!(f, "sync_interval_minutes = {}", self.sync_interval.as_secs() / 60)?;
        writeln!(f, "lookback_days = {}", self.lookback_days)?;
        writeln!(f, "connect_timeout_secs = {}", self.connect_timeout.as_secs())?;
        writeln!(f, "read_timeout_secs = {}", self.read_timeout.as_secs())?;
        writeln!(f, "api_timeout_secs = {}", self.api_timeout.as_secs())?;
        if let Some(path) = &self.log_file {
            writeln!(f, "log_file = \"{}\"", path.display())?;
        }
        Ok(())
    }
}

/// Resolves configuration from every layer.
///
/// `dir` is where `.env` and the default config file are looked up.
pub fn resolve(dir: &Path, config_path: Option<&Path>, flags: ConfigLayer) -> Result<Config> {
    env::load_dotenv(dir)?;

    let file = match config_path {
        Some(path) => ConfigLayer::from_file(path)?,
        None => {
            let default_path = dir.join(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                ConfigLayer::from_file(&default_path)?
            } else {
                ConfigLayer::default()
            }
        }
    };

    Config::from_layer(flags.or(ConfigLayer::from_env()?).or(file))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
