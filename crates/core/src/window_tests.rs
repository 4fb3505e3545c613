// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;

#[test]
fn cutoff_is_now_minus_lookback() {
    let now = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap().and_hms_opt(12, 0, 0).unwrap();
    let window = SyncWindow::ending_at(now, Duration::days(7));
    let expected = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap().and_hms_opt(12, 0, 0).unwrap();
    assert_eq!(window.cutoff(), expected);
    assert_eq!(window.end(), now);
}

#[test]
fn huge_lookback_saturates() {
    let now = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap().and_hms_opt(12, 0, 0).unwrap();
    let window = SyncWindow::ending_at(now, Duration::MAX);
    assert_eq!(window.cutoff(), NaiveDateTime::MIN);
}
