// Copyright (c) 2025 Spendbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::hasher;
use crate::models::Account;
use crate::store::is_unique_violation;

/// Create an account with a freshly digested password. Fails with
/// `Duplicate` when the username is taken and performs no write; the
/// plaintext never reaches the store.
pub fn create(conn: &Connection, username: &str, password: &str) -> Result<i64> {
    if username.is_empty() {
        return Err(Error::Validation("Username must not be empty".into()));
    }
    if password.is_empty() {
        return Err(Error::Validation("Password must not be empty".into()));
    }
    if find_by_username(conn, username)?.is_some() {
        return Err(Error::Duplicate(format!(
            "Account '{}' already exists",
            username
        )));
    }

    let digest = hasher::hash(password);
    let res = conn.execute(
        "INSERT INTO accounts(username, password_digest, created_at) VALUES (?1, ?2, ?3)",
        params![username, digest, Utc::now()],
    );
    match res {
        Ok(_) => {
            let id = conn.last_insert_rowid();
            info!("Created account {} for username '{}'", id, username);
            Ok(id)
        }
        // a concurrent create won the race between the check and the insert
        Err(e) if is_unique_violation(&e) => Err(Error::Duplicate(format!(
            "Account '{}' already exists",
            username
        ))),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_username(conn: &Connection, username: &str) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM accounts WHERE username=?1")?;
    let id = stmt.query_row(params![username], |r| r.get(0)).optional()?;
    Ok(id)
}

pub fn get_password_digest(conn: &Connection, account_id: i64) -> Result<String> {
    let mut stmt = conn.prepare("SELECT password_digest FROM accounts WHERE id=?1")?;
    let digest: Option<String> = stmt
        .query_row(params![account_id], |r| r.get(0))
        .optional()?;
    digest.ok_or_else(|| Error::NotFound(format!("Account {}", account_id)))
}

/// All accounts in insertion order. The password digest stays out of the
/// listing model.
pub fn list_all(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare("SELECT id, username, created_at FROM accounts ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok(Account {
            id: r.get(0)?,
            username: r.get(1)?,
            created_at: r.get(2)?,
        })
    })?;
    let mut accounts = Vec::new();
    for row in rows {
        accounts.push(row?);
    }
    debug!("Fetched {} accounts", accounts.len());
    Ok(accounts)
}
