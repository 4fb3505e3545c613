// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use crate::config::Config;
use crate::error::Result;

/// Prints the resolved configuration. Never contacts the terminal.
pub fn run(config: &Config) -> Result<()> {
    show(&mut std::io::stdout().lock(), config)
}

pub(crate) fn show(out: &mut impl Write, config: &Config) -> Result<()> {
    write!(out, "{}", config)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
