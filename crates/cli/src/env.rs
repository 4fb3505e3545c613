// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::Path;

use crate::error::{Error, Result};

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of a variable, treating blank values as unset.
pub fn get(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Loads `.env` from `dir` if present. Variables already set win.
///
/// Returns whether a file was loaded.
pub fn load_dotenv(dir: &Path) -> Result<bool> {
    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(false);
    }
    dotenvy::from_path(&path).map_err(|e| Error::ConfigFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(true)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
