// Copyright (c) 2025 Spendbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Windowed income/expense aggregation over one profile's ledger.
//!
//! The pure functions take the transaction slice and a reference `now`, so
//! aggregation never reads the system clock and sums stay deterministic under
//! test.

use chrono::{DateTime, Datelike, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{Transaction, TxnKind};
use crate::store::transactions;

/// Time bound applied when summing a ledger, matched by calendar component
/// against the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Day,
    Month,
    Year,
    AllTime,
}

impl Window {
    fn contains(self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Window::Day => date.date_naive() == now.date_naive(),
            Window::Month => date.year() == now.year() && date.month() == now.month(),
            Window::Year => date.year() == now.year(),
            Window::AllTime => true,
        }
    }
}

pub fn sum_by_kind(
    txns: &[Transaction],
    kind: TxnKind,
    window: Window,
    now: DateTime<Utc>,
) -> Decimal {
    txns.iter()
        .filter(|t| t.kind == kind && window.contains(t.date, now))
        .map(|t| t.amount)
        .sum()
}

/// Income minus expense for the window.
pub fn balance(txns: &[Transaction], window: Window, now: DateTime<Utc>) -> Decimal {
    sum_by_kind(txns, TxnKind::Income, window, now)
        - sum_by_kind(txns, TxnKind::Expense, window, now)
}

pub fn profile_income(
    conn: &Connection,
    account_id: i64,
    profile_id: i64,
    window: Window,
    now: DateTime<Utc>,
) -> Result<Decimal> {
    let txns = transactions::list_by_profile(conn, account_id, profile_id)?;
    Ok(sum_by_kind(&txns, TxnKind::Income, window, now))
}

pub fn profile_expense(
    conn: &Connection,
    account_id: i64,
    profile_id: i64,
    window: Window,
    now: DateTime<Utc>,
) -> Result<Decimal> {
    let txns = transactions::list_by_profile(conn, account_id, profile_id)?;
    Ok(sum_by_kind(&txns, TxnKind::Expense, window, now))
}

pub fn profile_balance(
    conn: &Connection,
    account_id: i64,
    profile_id: i64,
    window: Window,
    now: DateTime<Utc>,
) -> Result<Decimal> {
    let txns = transactions::list_by_profile(conn, account_id, profile_id)?;
    Ok(balance(&txns, window, now))
}
