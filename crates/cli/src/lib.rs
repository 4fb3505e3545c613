// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! punchsync - forwards attendance punches from a ZKTeco terminal to an
//! ingestion endpoint.
//!
//! This crate provides the sync engine behind the `punchsync` binary.
//!
//! # Main Components
//!
//! - [`device`] - Terminal sessions with timeouts and the capture pause/resume bracket
//! - [`ingest`] - Batch delivery to the remote ingestion endpoint
//! - [`sync`] - One sync cycle ([`SyncRun`](sync::SyncRun)) and its [`Scheduler`](sync::Scheduler)
//! - [`Config`] - Layered runtime configuration
//! - [`Error`] - Error types for all operations
//!
//! # Running a cycle
//!
//! ```rust,ignore
//! use punchsync::device::ZkConnector;
//! use punchsync::ingest::IngestionClient;
//! use punchsync::sync::{SyncEngine, SyncSettings};
//!
//! let ingest = IngestionClient::new(&config.api()?)?;
//! let settings = SyncSettings { lookback: config.lookback(), timeouts: config.session_timeouts() };
//! let engine = SyncEngine::new(ZkConnector, ingest, config.device.clone(), settings);
//! let outcome = engine.run_cycle().await;
//! ```

mod cli;
mod commands;
mod logging;

pub mod config;
pub mod device;
pub mod env;
pub mod error;
pub mod ingest;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat, SettingsArgs};
pub use config::Config;
pub use error::{Error, Result};

/// Execute a parsed command line. Configuration is resolved against the
/// current directory.
pub fn run(cli: Cli) -> Result<()> {
    let command = cli.resolved_command();
    let cwd = std::env::current_dir()?;
    let config = config::resolve(&cwd, cli.settings.config.as_deref(), cli.settings.layer())?;

    if command.needs_api() {
        config.api()?;
    }
    if command != Command::Config {
        logging::init(config.log_file.as_deref())?;
    }

    match command {
        Command::Sync => commands::sync::run_once(&config),
        Command::Daemon => commands::sync::run_daemon(&config),
        Command::Users { output } => commands::users::run(&config, output),
        Command::Config => commands::config::run(&config),
    }
}
