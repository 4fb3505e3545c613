// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use ps_zk::testing::{FakeTerminal, TerminalConfig};
use ps_zk::{AttendanceRecord, User};
use tokio::runtime::Runtime;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "ZKTECO_DEVICE_IP",
    "ZKTECO_DEVICE_PORT",
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "SUPABASE_BEARER_TOKEN",
    "SYNC_INTERVAL_MINUTES",
    "PUNCHSYNC_LOG_FILE",
    "RUST_LOG",
];

/// The binary, run in `dir` with every setting variable cleared.
pub fn punchsync(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("punchsync");
    cmd.current_dir(dir.path());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// A fake terminal served from its own runtime for as long as it lives.
pub struct Terminal {
    pub fake: FakeTerminal,
    _runtime: Runtime,
}

impl Terminal {
    pub fn start(config: TerminalConfig) -> Terminal {
        let runtime = Runtime::new().unwrap();
        let fake = runtime.block_on(FakeTerminal::start(config)).unwrap();
        Terminal { fake, _runtime: runtime }
    }

    pub fn port(&self) -> String {
        self.fake.port().to_string()
    }
}

/// Local time `hours` ago, at whole seconds.
pub fn hours_ago(hours: i64) -> NaiveDateTime {
    let now = Local::now().naive_local() - Duration::hours(hours);
    now.with_nanosecond(0).unwrap()
}

pub fn punch(user_id: &str, timestamp: NaiveDateTime) -> AttendanceRecord {
    AttendanceRecord { uid: user_id.parse().unwrap(), user_id: user_id.to_string(), timestamp, status: 1, punch: 0 }
}

pub fn user(uid: u16, name: &str, privilege: u8) -> User {
    User {
        uid,
        user_id: uid.to_string(),
        name: name.to_string(),
        privilege,
        password: String::new(),
        group_id: String::new(),
        card: 0,
    }
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port.to_string()
}
