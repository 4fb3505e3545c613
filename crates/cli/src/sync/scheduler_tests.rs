// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ps_core::SyncOutcome;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::*;

const INTERVAL: Duration = Duration::from_secs(30 * 60);

type Cycle = Pin<Box<dyn Future<Output = SyncOutcome> + Send>>;

/// Records the (paused) instant each cycle starts and replays `outcomes`,
/// cancelling `token` from inside the last one.
fn scripted(outcomes: Vec<SyncOutcome>, token: CancellationToken) -> (Arc<Mutex<Vec<Instant>>>, impl FnMut() -> Cycle) {
    let starts = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&starts);
    let mut remaining = outcomes.into_iter();
    let cycle = move || -> Cycle {
        seen.lock().unwrap().push(Instant::now());
        let outcome = remaining.next().unwrap_or(SyncOutcome::NoNewRecords);
        let last = remaining.len() == 0;
        let token = token.clone();
        Box::pin(async move {
            if last {
                token.cancel();
            }
            outcome
        })
    };
    (starts, cycle)
}

#[tokio::test(start_paused = true)]
async fn once_runs_a_single_cycle() {
    let (starts, cycle) = scripted(vec![SyncOutcome::NoNewRecords; 2], CancellationToken::new());

    let report = Scheduler::once().run(cycle, CancellationToken::new()).await;

    assert_eq!(report.cycles, 1);
    assert_eq!(report.last_outcome, Some(SyncOutcome::NoNewRecords));
    assert_eq!(starts.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn recurring_runs_immediately_then_on_interval() {
    let token = CancellationToken::new();
    let outcomes = vec![SyncOutcome::NoNewRecords; 3];
    let (starts, cycle) = scripted(outcomes, token.clone());
    let begin = Instant::now();

    let report = Scheduler::every(INTERVAL).run(cycle, token).await;

    assert_eq!(report.cycles, 3);
    let offsets: Vec<_> = starts.lock().unwrap().iter().map(|t| *t - begin).collect();
    assert_eq!(offsets, vec![Duration::ZERO, INTERVAL, INTERVAL * 2]);
}

#[tokio::test(start_paused = true)]
async fn failures_do_not_stop_the_schedule() {
    let token = CancellationToken::new();
    let outcomes = vec![
        SyncOutcome::ConnectionFailed("timed out".into()),
        SyncOutcome::DeliveryFailed("HTTP 500".into()),
        SyncOutcome::Success { added: 3, fetched: 3, warnings: vec![] },
    ];
    let (_, cycle) = scripted(outcomes, token.clone());

    let report = Scheduler::every(INTERVAL).run(cycle, token).await;

    assert_eq!(report.cycles, 3);
    assert_eq!(report.failures, 2);
    assert_eq!(report.last_outcome, Some(SyncOutcome::Success { added: 3, fetched: 3, warnings: vec![] }));
}

#[tokio::test(start_paused = true)]
async fn cancellation_between_cycles_stops_promptly() {
    let token = CancellationToken::new();
    let calls = Arc::new(Mutex::new(0u32));
    let counted = Arc::clone(&calls);
    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(INTERVAL + Duration::from_secs(60)).await;
        cancel.cancel();
    });

    let report = Scheduler::every(INTERVAL)
        .run(
            move || {
                *counted.lock().unwrap() += 1;
                std::future::ready(SyncOutcome::NoNewRecords)
            },
            token,
        )
        .await;

    assert_eq!(report.cycles, 2);
    assert_eq!(*calls.lock().unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn overrunning_cycle_delays_the_next_tick() {
    let token = CancellationToken::new();
    let starts = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&starts);
    let cancel = token.clone();
    let begin = Instant::now();

    Scheduler::every(INTERVAL)
        .run(
            move || {
                let seen = Arc::clone(&seen);
                let cancel = cancel.clone();
                async move {
                    seen.lock().unwrap().push(Instant::now());
                    let first = seen.lock().unwrap().len() == 1;
                    if first {
                        tokio::time::sleep(INTERVAL + Duration::from_secs(5 * 60)).await;
                    } else {
                        cancel.cancel();
                    }
                    SyncOutcome::NoNewRecords
                }
            },
            token,
        )
        .await;

    let offsets: Vec<_> = starts.lock().unwrap().iter().map(|t| *t - begin).collect();
    assert_eq!(offsets, vec![Duration::ZERO, INTERVAL + Duration::from_secs(5 * 60)]);
}

#[tokio::test]
async fn cancelled_before_start_runs_nothing() {
    let token = CancellationToken::new();
    token.cancel();

    let report = Scheduler::every(INTERVAL).run(|| std::future::ready(SyncOutcome::NoNewRecords), token).await;

    assert_eq!(report, ScheduleReport::default());
}

#[test]
fn interval_is_exposed_for_recurring_mode_only() {
    assert_eq!(Scheduler::once().interval(), None);
    assert_eq!(Scheduler::every(INTERVAL).interval(), Some(INTERVAL));
}
