// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;
    let path = std::path::Path::new(&out_dir).join("env_vars.rs");
    let mut f = std::fs::File::create(path)?;

    let vars = [
        ("DEVICE_IP", "ZKTECO_DEVICE_IP"),
        ("DEVICE_PORT", "ZKTECO_DEVICE_PORT"),
        ("API_URL", "SUPABASE_URL"),
        ("API_KEY", "SUPABASE_ANON_KEY"),
        ("BEARER_TOKEN", "SUPABASE_BEARER_TOKEN"),
        ("SYNC_INTERVAL_MINUTES", "SYNC_INTERVAL_MINUTES"),
        ("LOG_FILE", "PUNCHSYNC_LOG_FILE"),
    ];

    for (const_name, env_name) in &vars {
        writeln!(f, "pub const {const_name}: &str = \"{env_name}\";")?;
    }

    Ok(())
}
