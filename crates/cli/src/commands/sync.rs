// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `sync` and `daemon` commands.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::runtime;
use crate::config::Config;
use crate::device::ZkConnector;
use crate::error::{Error, Result};
use crate::ingest::IngestionClient;
use crate::sync::{ScheduleReport, Scheduler, SyncEngine, SyncSettings};

fn engine(config: &Config) -> Result<SyncEngine<ZkConnector, IngestionClient>> {
    let api = config.api()?;
    let ingest = IngestionClient::new(&api)?;
    info!(device = %config.device, endpoint = ingest.endpoint(), "sync configured");
    let settings = SyncSettings { lookback: config.lookback(), timeouts: config.session_timeouts() };
    Ok(SyncEngine::new(ZkConnector, ingest, config.device.clone(), settings))
}

/// Runs a single cycle. A failed cycle is returned as [`Error::SyncFailed`].
pub fn run_once(config: &Config) -> Result<()> {
    let engine = engine(config)?;
    let engine = &engine;
    let report = runtime()?.block_on(Scheduler::once().run(move || engine.run_cycle(), CancellationToken::new()));
    finish_once(report)
}

fn finish_once(report: ScheduleReport) -> Result<()> {
    match report.last_outcome {
        Some(outcome) if outcome.is_failure() => Err(Error::SyncFailed(outcome)),
        Some(outcome) => {
            println!("{}", outcome);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Runs cycles on the configured interval until Ctrl-C or SIGTERM.
pub fn run_daemon(config: &Config) -> Result<()> {
    let engine = engine(config)?;
    let engine = &engine;
    let scheduler = Scheduler::every(config.sync_interval);
    info!(
        device = %config.device,
        interval_minutes = config.sync_interval.as_secs() / 60,
        lookback_days = config.lookback_days,
        "starting punchsync daemon"
    );

    let report = runtime()?.block_on(async move {
        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            trigger.cancel();
        });
        scheduler.run(move || engine.run_cycle(), shutdown).await
    });

    info!(cycles = report.cycles, failures = report.failures, "punchsync daemon stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl-C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
