// Copyright (c) 2025 Spendbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Transaction, TxnKind};

/// Record a ledger entry. `date` of `None` stamps the insertion time.
pub fn insert(
    conn: &Connection,
    account_id: i64,
    profile_id: i64,
    kind: TxnKind,
    amount: Decimal,
    comment: Option<&str>,
    date: Option<DateTime<Utc>>,
) -> Result<i64> {
    let amount = checked_amount(amount)?;
    if !profile_owned_by(conn, account_id, profile_id)? {
        return Err(Error::NotFound(format!(
            "Profile {} under account {}",
            profile_id, account_id
        )));
    }
    let date = date.unwrap_or_else(Utc::now);
    conn.execute(
        "INSERT INTO transactions(account_id, profile_id, transaction_type, amount, comment, transaction_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            account_id,
            profile_id,
            kind.as_str(),
            format!("{:.2}", amount),
            comment,
            date
        ],
    )?;
    let id = conn.last_insert_rowid();
    info!(
        "Recorded {} of {} on profile {} (transaction {})",
        kind.as_str(),
        amount,
        profile_id,
        id
    );
    Ok(id)
}

/// Rewrite a transaction in place. Returns whether a matching row existed;
/// the account/profile scoping keeps one owner from touching another's rows.
pub fn update(
    conn: &Connection,
    transaction_id: i64,
    account_id: i64,
    profile_id: i64,
    kind: TxnKind,
    amount: Decimal,
    comment: Option<&str>,
) -> Result<bool> {
    let amount = checked_amount(amount)?;
    let affected = conn.execute(
        "UPDATE transactions SET transaction_type=?1, amount=?2, comment=?3
         WHERE id=?4 AND account_id=?5 AND profile_id=?6",
        params![
            kind.as_str(),
            format!("{:.2}", amount),
            comment,
            transaction_id,
            account_id,
            profile_id
        ],
    )?;
    Ok(affected > 0)
}

/// Delete a transaction under the same scoping discipline. Returns whether a
/// row was deleted.
pub fn remove(
    conn: &Connection,
    account_id: i64,
    profile_id: i64,
    transaction_id: i64,
) -> Result<bool> {
    let affected = conn.execute(
        "DELETE FROM transactions WHERE account_id=?1 AND profile_id=?2 AND id=?3",
        params![account_id, profile_id, transaction_id],
    )?;
    if affected > 0 {
        info!("Removed transaction {} from profile {}", transaction_id, profile_id);
    }
    Ok(affected > 0)
}

pub fn get(
    conn: &Connection,
    account_id: i64,
    profile_id: i64,
    transaction_id: i64,
) -> Result<Option<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, profile_id, transaction_type, amount, comment, transaction_date
         FROM transactions WHERE account_id=?1 AND profile_id=?2 AND id=?3",
    )?;
    let txn = stmt
        .query_row(params![account_id, profile_id, transaction_id], row_to_transaction)
        .optional()?;
    Ok(txn)
}

/// Every transaction of one profile. No ordering guarantee beyond "all
/// matching rows present".
pub fn list_by_profile(
    conn: &Connection,
    account_id: i64,
    profile_id: i64,
) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, profile_id, transaction_type, amount, comment, transaction_date
         FROM transactions WHERE account_id=?1 AND profile_id=?2",
    )?;
    let rows = stmt.query_map(params![account_id, profile_id], row_to_transaction)?;
    let mut txns = Vec::new();
    for row in rows {
        txns.push(row?);
    }
    debug!("Fetched {} transactions for profile {}", txns.len(), profile_id);
    Ok(txns)
}

/// Like `list_by_profile`, bounded by inclusive calendar dates. Either bound
/// may be open.
pub fn list_by_profile_between(
    conn: &Connection,
    account_id: i64,
    profile_id: i64,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<Transaction>> {
    let txns = list_by_profile(conn, account_id, profile_id)?;
    Ok(txns
        .into_iter()
        .filter(|t| {
            let day = t.date.date_naive();
            from.map_or(true, |f| day >= f) && to.map_or(true, |u| day <= u)
        })
        .collect())
}

fn checked_amount(amount: Decimal) -> Result<Decimal> {
    if amount < Decimal::ZERO {
        return Err(Error::Validation(format!(
            "Amount {} must not be negative",
            amount
        )));
    }
    Ok(amount.round_dp(2))
}

fn profile_owned_by(conn: &Connection, account_id: i64, profile_id: i64) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT account_id FROM profiles WHERE id=?1")?;
    let owner: Option<i64> = stmt
        .query_row(params![profile_id], |r| r.get(0))
        .optional()?;
    Ok(owner == Some(account_id))
}

fn row_to_transaction(r: &Row) -> rusqlite::Result<Transaction> {
    let kind_s: String = r.get(3)?;
    let amount_s: String = r.get(4)?;
    Ok(Transaction {
        id: r.get(0)?,
        account_id: r.get(1)?,
        profile_id: r.get(2)?,
        kind: kind_s
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?,
        amount: amount_s
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
        comment: r.get(5)?,
        date: r.get(6)?,
    })
}
